//! Logging setup for the formgrid binary.

use tracing_subscriber::EnvFilter;

/// Initialize tracing to stderr. `RUST_LOG` wins over the verbosity flag.
pub fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("formgrid_cli={level},formgrid_kernel={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
