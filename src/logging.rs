//! Logging configuration using the tracing framework
//!
//! Logs can be controlled via the RUST_LOG environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "vair=info,warn";
const VERBOSE_FILTER: &str = "vair=debug,warn";
const TEST_FILTER: &str = "vair=warn,error";

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize the logging system
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log level (e.g., "debug", "info", "warn", "error")
///   - Default: "vair=info", or "vair=debug" when `verbose` is set
///   - Examples:
///     - `RUST_LOG=vair::catalog=debug` - Debug logs for the catalog only
///     - `RUST_LOG=vair::pricing=debug` - Show every computed estimate
///
/// # Examples
///
/// ```no_run
/// use vair::logging;
///
/// logging::init(false);
/// tracing::info!("Application started");
/// ```
pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

/// Initialize logging with an additional daily-rotated log file
///
/// The file lives under the platform data directory (`.../vair/logs`),
/// or the current directory if that cannot be determined.
///
/// ```no_run
/// use vair::logging;
///
/// logging::init_with_file("vair.log", false).expect("Failed to initialize logging");
/// ```
pub fn init_with_file(log_file_name: &str, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let log_dir = if let Some(proj_dirs) = directories::ProjectDirs::from("com", "vair", "vair") {
        let log_path = proj_dirs.data_dir().join("logs");
        std::fs::create_dir_all(&log_path)?;
        log_path
    } else {
        std::env::current_dir()?
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, log_file_name);

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .init();

    Ok(())
}

/// Initialize logging for tests.
///
/// Output goes through the test harness capture, so it only shows for
/// failing tests. By default vair's own warnings (full activities,
/// unknown ids) are kept and other crates are limited to errors.
pub fn init_test() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(TEST_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_test_writer()
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .ok(); // already initialized by another test
}
