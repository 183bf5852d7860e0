use colored::Colorize;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Opt-in logging setup for host applications and tests. Library code only
/// emits through `log`; nothing is printed unless the host installs a
/// logger. Safe to call more than once (later calls are no-ops), so test
/// functions can each call it.
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(|buf, record| {
            let name = env!("CARGO_PKG_NAME").cyan();
            let tag = match record.level() {
                Level::Error => "ERROR".red(),
                Level::Warn => "WARN".yellow(),
                Level::Info => "INFO".normal(),
                Level::Debug | Level::Trace => "DEBUG".dimmed(),
            };
            writeln!(buf, "[{} {}] {}", name, tag, record.args())
        })
        .try_init();
}
