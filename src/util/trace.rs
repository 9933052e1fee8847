//! Installs a `tracing_subscriber` formatter, filtered by `RUST_LOG`,
//! so the spans emitted by instrumented matching steps are printed.
//!
//! ```bash
//! RUST_LOG=kinematch=debug kinematch network.jsonl grid.jsonl trace.jsonl
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}
