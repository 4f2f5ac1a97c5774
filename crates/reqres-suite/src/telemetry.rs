use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Routes suite and HTTP-stack logs through one subscriber.
///
/// Levels come from `RUST_LOG` and fall back to `info`. reqwest still emits
/// some records through `log`, which are bridged into `tracing` here. Output
/// goes to the test writer, so passing tests stay quiet. Repeat calls do nothing.
pub fn init() {
    let _ = LogTracer::init();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_target(true).with_test_writer().compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
