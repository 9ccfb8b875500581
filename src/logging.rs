use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

/// Install a stderr logger at `level`.
///
/// Called once by the binary. Library code only uses the `log` macros, so
/// tests run without any logger installed.
pub fn init(level: LevelFilter) {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level));

    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("[logging] logger already installed: {e}");
            }
        }
        Err(e) => eprintln!("[logging] invalid logger config: {e}"),
    }
}

/// Parse a level name (`"info"`, `"debug"`, ...) falling back to `Info`.
pub fn level_from_str(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(level_from_str("debug"), LevelFilter::Debug);
        assert_eq!(level_from_str("WARN"), LevelFilter::Warn);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(level_from_str("chatty"), LevelFilter::Info);
    }
}
