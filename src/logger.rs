//! Coloured, timestamped console logging.
//!
//! Every macro formats through [`line`] so all output shares one layout:
//! `<colour>[TAG]  [HH:MM:SS]<reset> message`.

/// Environment variable that enables the per-tick `event!` output.
pub const EVENTS_ENV: &str = "LOG_FLYOVER_EVENTS";

/// Builds one log line. `tag` is padded so messages line up.
pub fn line(color: &str, tag: &str, message: std::fmt::Arguments<'_>) -> String {
    let bracketed = format!("[{tag}]");
    format!("\x1b[{color}m{bracketed:<7}[{}]\x1b[0m {message}", chrono::Utc::now().format("%H:%M:%S"))
}

/// Whether `event!` output is enabled, decided by `lookup` of [`EVENTS_ENV`].
pub fn events_enabled(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup(EVENTS_ENV).is_some_and(|v| !matches!(v.trim(), "" | "0" | "false"))
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { println!("{}", $crate::logger::line("32", "INFO", format_args!($($arg)*))) };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => { println!("{}", $crate::logger::line("33", "LOG", format_args!($($arg)*))) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { println!("{}", $crate::logger::line("35", "WARN", format_args!($($arg)*))) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { println!("{}", $crate::logger::line("31", "ERROR", format_args!($($arg)*))) };
}

/// Logs and panics. Only for startup failures the tracker cannot run without.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => { panic!("{}", $crate::logger::line("1;31", "FATAL", format_args!($($arg)*))) };
}

/// Announcements about the tracked pass (selection, rise, completion).
#[macro_export]
macro_rules! pass {
    ($($arg:tt)*) => { println!("{}", $crate::logger::line("1;34", "PASS", format_args!($($arg)*))) };
}

/// Per-tick chatter, only printed when `LOG_FLYOVER_EVENTS` is set to something other than `0`.
#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if $crate::logger::events_enabled(|name| std::env::var(name).ok()) {
            println!("{}", $crate::logger::line("36", "EVENT", format_args!($($arg)*)))
        }
    };
}
