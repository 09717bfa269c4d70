use glium::backend::Facade;
use glium::texture::{MipmapsOption, RawImage2d, Texture2d, TextureCreationError};
use glium::uniforms::{
    MagnifySamplerFilter, MinifySamplerFilter, SamplerBehavior, SamplerWrapFunction,
};
use std::fmt;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum TextureError {
    Io(io::Error),
    Decoding(png::DecodingError),
    Unsupported(png::ColorType),
    Upload(TextureCreationError),
}

impl From<io::Error> for TextureError {
    fn from(err: io::Error) -> Self {
        TextureError::Io(err)
    }
}

impl From<png::DecodingError> for TextureError {
    fn from(err: png::DecodingError) -> Self {
        TextureError::Decoding(err)
    }
}

impl From<TextureCreationError> for TextureError {
    fn from(err: TextureCreationError) -> Self {
        TextureError::Upload(err)
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io(err) => write!(f, "{}", err),
            TextureError::Decoding(err) => write!(f, "{}", err),
            TextureError::Unsupported(color_type) => {
                write!(f, "unsupported pixel layout {:?}", color_type)
            }
            TextureError::Upload(err) => write!(f, "{:?}", err),
        }
    }
}

impl std::error::Error for TextureError {}

/// Wrapping and filtering applied when a texture is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub wrap_s: SamplerWrapFunction,
    pub wrap_t: SamplerWrapFunction,
    pub min_filter: MinifySamplerFilter,
    pub mag_filter: MagnifySamplerFilter,
}

impl Sampling {
    pub fn new(
        wrap: SamplerWrapFunction,
        min_filter: MinifySamplerFilter,
        mag_filter: MagnifySamplerFilter,
    ) -> Self {
        Sampling {
            wrap_s: wrap,
            wrap_t: wrap,
            min_filter,
            mag_filter,
        }
    }

    /// Trilinear minification, bilinear magnification.
    pub fn smooth(wrap: SamplerWrapFunction) -> Self {
        Self::new(
            wrap,
            MinifySamplerFilter::LinearMipmapLinear,
            MagnifySamplerFilter::Linear,
        )
    }

    pub fn behavior(&self) -> SamplerBehavior {
        SamplerBehavior {
            wrap_function: (self.wrap_s, self.wrap_t, SamplerWrapFunction::Repeat),
            minify_filter: self.min_filter,
            magnify_filter: self.mag_filter,
            ..Default::default()
        }
    }
}

impl Default for Sampling {
    fn default() -> Self {
        Self::smooth(SamplerWrapFunction::Repeat)
    }
}

/// Decoded RGBA8 pixels, rows in file order (top row first).
#[derive(Debug, Clone, PartialEq)]
pub struct PixelData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PixelData {
    pub fn read(path: &Path) -> Result<PixelData, TextureError> {
        let file = File::open(path)?;
        let mut decoder = png::Decoder::new(BufReader::new(file));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let rgba = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            other => return Err(TextureError::Unsupported(other)),
        };

        Ok(PixelData {
            width: info.width,
            height: info.height,
            rgba,
        })
    }

    /// Uploads with generated mipmaps. Rows are flipped so that texture coordinate (0, 0)
    /// lands on the bottom-left pixel.
    pub fn upload<F: Facade + ?Sized>(&self, facade: &F) -> Result<Texture2d, TextureError> {
        let image = RawImage2d::from_raw_rgba_reversed(&self.rgba, (self.width, self.height));
        let texture = Texture2d::with_mipmaps(facade, image, MipmapsOption::AutoGeneratedMipmaps)?;
        Ok(texture)
    }
}

/// Index of a texture slot inside a `TextureStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

struct TextureSlot {
    path: PathBuf,
    texture: Option<Texture2d>,
    sampling: Sampling,
}

/// Owns every texture loaded at startup.
///
/// A slot whose load failed stays in the store without a GPU texture, so handles given out
/// for it remain valid but bind nothing.
#[derive(Default)]
pub struct TextureStore {
    slots: Vec<TextureSlot>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<F: Facade + ?Sized>(
        &mut self,
        facade: &F,
        path: &Path,
        sampling: Sampling,
    ) -> TextureHandle {
        let loaded = PixelData::read(path).and_then(|pixels| pixels.upload(facade));
        self.insert(path, loaded, sampling)
    }

    /// Stores the outcome of a load. A failure is logged and still takes a slot.
    fn insert(
        &mut self,
        path: &Path,
        loaded: Result<Texture2d, TextureError>,
        sampling: Sampling,
    ) -> TextureHandle {
        match loaded {
            Ok(texture) => {
                log::debug!(
                    "Loaded texture {} ({}x{})",
                    path.display(),
                    texture.width(),
                    texture.height()
                );
                self.push(path, Some(texture), sampling)
            }
            Err(err) => {
                log::error!("Texture failed to load at path: {}: {}", path.display(), err);
                self.push(path, None, sampling)
            }
        }
    }

    pub fn push_unbound<P: AsRef<Path>>(&mut self, path: P, sampling: Sampling) -> TextureHandle {
        self.push(path.as_ref(), None, sampling)
    }

    pub fn get(&self, handle: TextureHandle) -> Option<(&Texture2d, SamplerBehavior)> {
        let slot = self.slots.get(handle.0)?;
        slot.texture
            .as_ref()
            .map(|texture| (texture, slot.sampling.behavior()))
    }

    pub fn is_bound(&self, handle: TextureHandle) -> bool {
        self.slots
            .get(handle.0)
            .map_or(false, |slot| slot.texture.is_some())
    }

    pub fn sampling(&self, handle: TextureHandle) -> Option<Sampling> {
        self.slots.get(handle.0).map(|slot| slot.sampling)
    }

    pub fn path(&self, handle: TextureHandle) -> Option<&Path> {
        self.slots.get(handle.0).map(|slot| slot.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn push(&mut self, path: &Path, texture: Option<Texture2d>, sampling: Sampling) -> TextureHandle {
        self.slots.push(TextureSlot {
            path: path.to_path_buf(),
            texture,
            sampling,
        });
        TextureHandle(self.slots.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_missing_file_fails_with_io_error() {
        let result = PixelData::read(Path::new("does/not/exist/container2.png"));
        match result {
            Err(TextureError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn failed_slot_keeps_handle_but_binds_nothing() {
        let mut store = TextureStore::new();
        let mirrored = Sampling::smooth(SamplerWrapFunction::Mirror);
        let handle = store.push_unbound("does/not/exist.png", mirrored);

        assert_eq!(store.len(), 1);
        assert!(!store.is_bound(handle));
        assert!(store.get(handle).is_none());
        assert_eq!(store.sampling(handle), Some(mirrored));
        assert_eq!(store.path(handle), Some(Path::new("does/not/exist.png")));
    }

    #[test]
    fn failed_load_takes_a_slot_without_texture() {
        let mut store = TextureStore::new();
        let missing = Path::new("does/not/exist/emoji.png");
        let loaded: Result<Texture2d, TextureError> =
            PixelData::read(missing).and_then(|_| unreachable!());
        let clamped = Sampling::smooth(SamplerWrapFunction::Clamp);

        let handle = store.insert(missing, loaded, clamped);
        let next = store.push_unbound("white_background.png", Sampling::default());

        assert_eq!(handle, TextureHandle(0));
        assert_eq!(next, TextureHandle(1));
        assert_eq!(store.len(), 2);
        assert!(!store.is_bound(handle));
        assert_eq!(store.sampling(handle), Some(clamped));
        assert_eq!(store.path(handle), Some(missing));
    }

    #[test]
    fn sampling_maps_onto_sampler_behavior() {
        let sampling = Sampling::new(
            SamplerWrapFunction::Clamp,
            MinifySamplerFilter::Nearest,
            MagnifySamplerFilter::Nearest,
        );
        let behavior = sampling.behavior();

        assert_eq!(behavior.wrap_function.0, SamplerWrapFunction::Clamp);
        assert_eq!(behavior.wrap_function.1, SamplerWrapFunction::Clamp);
        assert_eq!(behavior.minify_filter, MinifySamplerFilter::Nearest);
        assert_eq!(behavior.magnify_filter, MagnifySamplerFilter::Nearest);
    }

    #[test]
    fn reads_bundled_container_texture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/textures/container2.png");
        let pixels = PixelData::read(&path).unwrap();

        assert!(pixels.width > 0 && pixels.height > 0);
        assert_eq!(pixels.rgba.len(), (pixels.width * pixels.height * 4) as usize);
    }

    #[test]
    fn rgb_images_get_opaque_alpha() {
        let path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/textures/white_background.png");
        let pixels = PixelData::read(&path).unwrap();

        assert!(pixels.rgba.chunks_exact(4).all(|p| p == [255, 255, 255, 255]));
    }
}
