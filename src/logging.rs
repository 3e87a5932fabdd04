//! Logger bootstrap for the command-line front end.
//!
//! Library code only talks to the `log` facade. Records are metadata-only
//! (`event=... key=value`); entry titles and bodies are never logged.

use flexi_logger::{Logger, LoggerHandle};
use std::sync::OnceLock;

/// Environment variable holding the log level
pub const LOG_ENV_VAR: &str = "CODEX_LOG";

const DEFAULT_LEVEL: &str = "warn";

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

/// Start logging to stderr.
///
/// Level comes from `verbose` (forces `debug`), then `CODEX_LOG`, then `warn`.
/// Calling this more than once is a no-op. Never panics; a logger that
/// fails to start is reported as an error string.
pub fn init_logging(verbose: bool) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let level = if verbose {
        "debug".to_string()
    } else {
        match std::env::var(LOG_ENV_VAR) {
            Ok(value) => normalize_level(&value)?.to_string(),
            Err(_) => DEFAULT_LEVEL.to_string(),
        }
    };

    let handle = Logger::try_with_str(&level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    let _ = LOGGER.set(handle);
    log::debug!("event=logging_init module=cli level={}", level);
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_level;

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO").unwrap(), "info");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert_eq!(normalize_level("off").unwrap(), "off");
    }

    #[test]
    fn normalize_level_rejects_unknown() {
        let error = normalize_level("loud").unwrap_err();
        assert!(error.contains("unsupported log level"));
    }
}
