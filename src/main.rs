use std::path::PathBuf;
use std::process::ExitCode;

use pinchfield::{app, AppError, Config};

fn load_config() -> Result<Config, AppError> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let config = Config::load(&path)?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            log::info!("Using default config");
            Ok(Config::default())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let result = load_config().and_then(app::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("pinchfield: {}", e);
            ExitCode::FAILURE
        }
    }
}
