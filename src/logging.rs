//! Tracing subscriber setup for the `fm` binary.
//!
//! Logs go to stderr so stdout stays clean for reports. `RUST_LOG` overrides the
//! verbosity flag.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_cli_logger(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "fusion_matrix=info",
        1 => "fusion_matrix=debug,info",
        _ => "fusion_matrix=trace,debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
