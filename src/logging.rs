use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ROFIMENU_LOG";
pub const LOG_FORMAT_ENV: &str = "ROFIMENU_LOG_FORMAT";

/// Installs the global subscriber. Logs go to stderr; stdout carries the
/// final selection.
///
/// `verbosity` (count of `-v`) only applies when neither `ROFIMENU_LOG` nor
/// `RUST_LOG` is set.
pub fn init(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let is_json = matches!(
        std::env::var(LOG_FORMAT_ENV).ok().as_deref(),
        Some("json") | Some("JSON")
    );
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if is_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
