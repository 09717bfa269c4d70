use crate::scene::ViewMode;
use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;

pub const TITLE: &str = "CSE 4208: Computer Graphics Laboratory";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub assets: PathBuf,
    pub width: u32,
    pub height: u32,
    pub log_level: LevelFilter,
    pub view: ViewMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    Invalid { arg: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Invalid { arg, value } => {
                write!(f, "invalid value `{}` for --{}", value, arg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

pub fn app() -> App<'static, 'static> {
    App::new("butai")
        .about("Lit, textured cube scene")
        .arg(
            Arg::with_name("assets")
                .long("assets")
                .value_name("DIR")
                .help("Directory holding shaders/ and textures/")
                .takes_value(true)
                .default_value("assets"),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .default_value("800"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .default_value("600"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .default_value("info"),
        )
        .arg(
            Arg::with_name("view")
                .long("view")
                .help("Camera to start with")
                .takes_value(true)
                .possible_values(&["fly", "eye"])
                .default_value("fly"),
        )
}

fn parsed<T: std::str::FromStr>(matches: &ArgMatches, arg: &'static str) -> Result<T, SettingsError> {
    let value = matches.value_of(arg).unwrap_or_default();
    value.parse().map_err(|_| SettingsError::Invalid {
        arg,
        value: value.to_owned(),
    })
}

fn dimension(matches: &ArgMatches, arg: &'static str) -> Result<u32, SettingsError> {
    match parsed::<u32>(matches, arg)? {
        0 => Err(SettingsError::Invalid {
            arg,
            value: "0".to_owned(),
        }),
        size => Ok(size),
    }
}

impl Settings {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, SettingsError> {
        Ok(Settings {
            assets: PathBuf::from(matches.value_of("assets").unwrap_or("assets")),
            width: dimension(matches, "width")?,
            height: dimension(matches, "height")?,
            log_level: parsed(matches, "log-level")?,
            view: parsed(matches, "view")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> Result<Settings, SettingsError> {
        let matches = app().get_matches_from_safe(args).unwrap();
        Settings::from_matches(&matches)
    }

    #[test]
    fn defaults_match_lab_window() {
        let settings = settings(&["butai"]).unwrap();

        assert_eq!(settings.assets, PathBuf::from("assets"));
        assert_eq!((settings.width, settings.height), (800, 600));
        assert_eq!(settings.log_level, LevelFilter::Info);
        assert_eq!(settings.view, ViewMode::Fly);
    }

    #[test]
    fn flags_override_defaults() {
        let settings = settings(&[
            "butai",
            "--assets",
            "/opt/lab",
            "--width",
            "1024",
            "--log-level",
            "trace",
            "--view",
            "eye",
        ])
        .unwrap();

        assert_eq!(settings.assets, PathBuf::from("/opt/lab"));
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.height, 600);
        assert_eq!(settings.log_level, LevelFilter::Trace);
        assert_eq!(settings.view, ViewMode::Eye);
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        let err = settings(&["butai", "--height", "tall"]).unwrap_err();

        assert_eq!(
            err,
            SettingsError::Invalid {
                arg: "height",
                value: "tall".to_owned()
            }
        );
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(settings(&["butai", "--width", "0"]).is_err());
    }

    #[test]
    fn unknown_view_fails_in_clap() {
        assert!(app()
            .get_matches_from_safe(&["butai", "--view", "orbit"])
            .is_err());
    }
}
