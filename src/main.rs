use std::process::ExitCode;
use std::rc::Rc;

use tilewalk::config::GameConfig;
use tilewalk::game::{Fonts, Session};
use tilewalk::renderer::text::TtfText;
use tilewalk::{engine, logging};

/// Config file read when no path is given on the command line.
const DEFAULT_CONFIG: &str = "tilewalk.json";

fn main() -> ExitCode {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.into());
    let config = match GameConfig::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tilewalk: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(logging::level_from_str(&config.log_level));

    let font_path = config.asset_path(&config.font);
    let fonts = match (
        TtfText::load(&font_path, config.font_size),
        TtfText::load(&font_path, config.pause_font_size),
    ) {
        (Ok(dialog), Ok(banner)) => Fonts { dialog: Rc::new(dialog), banner: Rc::new(banner) },
        (Err(e), _) | (_, Err(e)) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let session = match Session::start(config, &fonts) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match engine::run(session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("event loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
