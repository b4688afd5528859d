//! Logging for the coursegen workspace.
//!
//! Output is controlled by the `COURSEGEN_LOG` environment variable:
//! - `off` (default): nothing is emitted
//! - `error`, `warn`, `info`: the named level and above
//! - `debug`: everything, including the resolved template context

use std::sync::{Once, OnceLock};

// Re-exported so the macros below resolve `emit` from any crate.
pub use emit;

/// Environment variable that selects the minimum level.
pub const LOG_ENV: &str = "COURSEGEN_LOG";

static INIT: Once = Once::new();

/// Minimum level chosen by `init_diagnostics`; `None` while logging is off.
static MIN_LEVEL: OnceLock<Option<emit::Level>> = OnceLock::new();

/// Install the stderr emitter according to `COURSEGEN_LOG`.
///
/// Only binaries call this. Repeated calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let requested = std::env::var(LOG_ENV).unwrap_or_else(|_| "off".to_string());

        let level = match parse_level(&requested) {
            Some(Some(level)) => level,
            Some(None) => {
                let _ = MIN_LEVEL.set(None);
                return;
            }
            None => {
                // Bootstrap message; the emitter isn't installed yet.
                eprintln!("Warning: unknown {LOG_ENV} value '{requested}', using 'info'");
                emit::Level::Info
            }
        };

        let _ = MIN_LEVEL.set(Some(level));

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        // The runtime lives for the whole process.
        std::mem::forget(rt);
    });
}

/// Whether events at `level` reach the emitter. Lets callers skip building
/// expensive properties, such as a full context dump, when nothing listens.
/// Always false until `init_diagnostics` has run.
#[must_use]
pub fn enabled(level: emit::Level) -> bool {
    allows(MIN_LEVEL.get().copied().flatten(), level)
}

fn allows(min: Option<emit::Level>, level: emit::Level) -> bool {
    min.is_some_and(|min| rank(level) >= rank(min))
}

fn rank(level: emit::Level) -> u8 {
    match level {
        emit::Level::Debug => 0,
        emit::Level::Info => 1,
        emit::Level::Warn => 2,
        _ => 3,
    }
}

/// `Some(None)` means logging is off, `None` means the value is unknown.
fn parse_level(value: &str) -> Option<Option<emit::Level>> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" | "" => Some(None),
        "error" => Some(Some(emit::Level::Error)),
        "warn" => Some(Some(emit::Level::Warn)),
        "info" => Some(Some(emit::Level::Info)),
        "debug" => Some(Some(emit::Level::Debug)),
        _ => None,
    }
}

/// Progress a user running a build would want to see.
/// Examples: "Loaded 12 lectures", "Wrote 40213 bytes to dist/index.html"
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Step-by-step detail: partial registration, topic merges, the render context.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Suspicious but non-fatal input, e.g. a directory inside the templates folder.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// The failure that is about to end the build.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse() {
        assert_eq!(parse_level("off"), Some(None));
        assert_eq!(parse_level(""), Some(None));
        assert_eq!(parse_level("DEBUG"), Some(Some(emit::Level::Debug)));
        assert_eq!(parse_level(" warn "), Some(Some(emit::Level::Warn)));
    }

    #[test]
    fn level_gate() {
        assert!(!allows(None, emit::Level::Error));
        assert!(allows(Some(emit::Level::Debug), emit::Level::Debug));
        assert!(allows(Some(emit::Level::Info), emit::Level::Warn));
        assert!(!allows(Some(emit::Level::Info), emit::Level::Debug));
    }

    #[test]
    fn nothing_enabled_before_init() {
        assert!(!enabled(emit::Level::Debug));
    }

    #[test]
    fn unknown_level_is_reported() {
        assert_eq!(parse_level("verbose"), None);
    }
}
