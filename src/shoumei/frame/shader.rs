use glium::backend::Facade;
use glium::program::ProgramCreationError;
use glium::Program;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ShaderError {
    Io { path: PathBuf, source: io::Error },
    Compile { name: String, source: ProgramCreationError },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "cannot read shader {}: {}", path.display(), source)
            }
            ShaderError::Compile { name, source } => {
                write!(f, "cannot build program {}: {}", name, source)
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// A linked program together with the name it was loaded under.
pub struct Shader {
    pub name: String,
    pub program: Program,
}

/// `<root>/shaders/<name>.vert` and `<root>/shaders/<name>.frag`.
pub fn source_paths(root: &Path, name: &str) -> (PathBuf, PathBuf) {
    let dir = root.join("shaders");
    (
        dir.join(format!("{}.vert", name)),
        dir.join(format!("{}.frag", name)),
    )
}

fn read_source(path: PathBuf) -> Result<String, ShaderError> {
    fs::read_to_string(&path).map_err(|source| ShaderError::Io { path, source })
}

impl Shader {
    pub fn load<F: Facade + ?Sized>(facade: &F, root: &Path, name: &str) -> Result<Self, ShaderError> {
        let (vert_path, frag_path) = source_paths(root, name);
        let vertex = read_source(vert_path)?;
        let fragment = read_source(frag_path)?;

        let program = Program::from_source(facade, &vertex, &fragment, None).map_err(|source| {
            ShaderError::Compile {
                name: name.to_owned(),
                source,
            }
        })?;
        log::info!("Compiled shader program {}", name);

        Ok(Shader {
            name: name.to_owned(),
            program,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_live_below_shaders_dir() {
        let (vert, frag) = source_paths(Path::new("assets"), "lighting");

        assert_eq!(vert, Path::new("assets/shaders/lighting.vert"));
        assert_eq!(frag, Path::new("assets/shaders/lighting.frag"));
    }

    #[test]
    fn missing_source_reports_its_path() {
        let err = read_source(PathBuf::from("no/such/dir/flat.vert")).unwrap_err();

        match &err {
            ShaderError::Io { path, source } => {
                assert_eq!(path, Path::new("no/such/dir/flat.vert"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error {}", other),
        }
        assert!(format!("{}", err).contains("flat.vert"));
    }

    #[test]
    fn bundled_shaders_are_present() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        for name in ["lighting", "lighting_textured", "flat"].iter() {
            let (vert, frag) = source_paths(&root, name);
            assert!(read_source(vert).unwrap().starts_with("#version 330 core"));
            assert!(read_source(frag).unwrap().starts_with("#version 330 core"));
        }
    }
}
