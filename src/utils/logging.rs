use std::sync::Once;

static LOGGER_INIT: Once = Once::new();

/// Installs the logger with the `Info` level.
///
/// See [`init_logger_with_level`].
pub fn init_logger() {
    init_logger_with_level(log::LevelFilter::Info)
}

/// Installs a colored logger printing to the standard error.
///
/// The logger is installed once per process; subsequent calls have no effect.
/// If another logger has already been installed by the calling program, this one is silently ignored.
pub fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "![{:5}] {} {}: {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply()
            .unwrap_or(());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init_logger_with_level(log::LevelFilter::Trace);
        init_logger();
        log::trace!("logger initialized");
    }
}
