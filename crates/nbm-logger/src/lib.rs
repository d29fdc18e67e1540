use colored::Colorize;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable that overrides the verbosity-derived filter
pub const LOG_ENV_VAR: &str = "NBM_LOG";

static VERBOSITY: Mutex<u8> = Mutex::new(0);

/// Get the current verbosity level
pub fn get_verbosity() -> u8 {
    VERBOSITY.lock().ok().map(|v| *v).unwrap_or(0)
}

/// Convert verbosity level to a tracing filter directive
/// 0 = warn only, 1 = debug (-v), 2 = trace (-vv)
pub fn verbosity_to_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber. `NBM_LOG` takes precedence over
/// the verbosity level when set.
pub fn init_with_verbosity(verbosity: u8) -> Result<(), String> {
    if let Ok(mut v) = VERBOSITY.lock() {
        *v = verbosity;
    }

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_filter(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| format!("Failed to initialize logger: {}", e))
}

/// Log an informational message (to console if verbose >= 1)
pub fn info(message: &str) {
    if get_verbosity() >= 1 {
        eprintln!("{}", message);
    }
}

/// Log a warning message
pub fn warn(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Log an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Log a success message (to console only for user feedback)
pub fn success(message: &str) {
    let check = "\u{2714}".green().bold();
    eprintln!("{} {}", check, message);
}
