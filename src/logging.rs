use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "REDIRSCAN_LOG";

/// Diagnostics go to stderr so stdout stays reserved for result lines.
/// `RUST_LOG` wins over `REDIRSCAN_LOG`; without either, only warnings show
/// unless `verbose` is set.
pub fn init(verbose: bool) {
    let directive = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV))
        .unwrap_or_else(|_| default_directive(verbose));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed (tests, embedding); that's fine.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(EnvFilter::new(directive))
        .try_init();
}

fn default_directive(verbose: bool) -> String {
    if verbose {
        format!("warn,{}=debug", env!("CARGO_CRATE_NAME"))
    } else {
        "warn".to_string()
    }
}
