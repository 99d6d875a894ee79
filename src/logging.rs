//! Logger setup: a `fern` dispatcher writing timestamped lines to stderr.

use log::LevelFilter;

/// Parses a level name, falling back to `Info` for anything unrecognised.
pub fn parse_level(level: &str) -> (LevelFilter, bool) {
    match level.trim().parse::<LevelFilter>() {
        Ok(filter) => (filter, true),
        Err(_) => (LevelFilter::Info, false),
    }
}

/// Installs the global logger. Must be called once, before anything logs.
pub fn init(level: &str) -> Result<(), log::SetLoggerError> {
    let (filter, recognised) = parse_level(level);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(filter)
        .chain(std::io::stderr())
        .apply()?;

    if !recognised {
        log::warn!("Unknown log level {level:?}, using info");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), (LevelFilter::Debug, true));
        assert_eq!(parse_level(" WARN "), (LevelFilter::Warn, true));
        assert_eq!(parse_level("off"), (LevelFilter::Off, true));
        assert_eq!(parse_level("loud"), (LevelFilter::Info, false));
    }
}
