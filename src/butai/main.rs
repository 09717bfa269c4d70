use shoumei::debug::logging;
use shoumei::engine::{StartupError, State};
use shoumei::scene::Scene;
use shoumei::settings::{self, Settings};

fn run() -> Result<(), StartupError> {
    let matches = settings::app().get_matches();
    let settings = Settings::from_matches(&matches)?;
    let _handle = logging::init(settings.log_level)?;
    log::info!(
        "Starting with assets from {} ({:?} view)",
        settings.assets.display(),
        settings.view
    );

    let scene = Scene::lab(settings.width, settings.height).with_view(settings.view);
    State::run_loop(&settings, scene)
}

fn main() {
    match run() {
        Ok(()) => log::info!("Bye"),
        Err(err @ StartupError::Settings(_)) | Err(err @ StartupError::Logging(_)) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}
