use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "uniicon=debug,tower_http=debug";
const QUIET_FILTER: &str = "warn";

/// Initialize tracing with a compact console format.
///
/// `RUST_LOG` wins when set; otherwise `quiet` selects between the debug
/// filter and warnings only.
pub fn init_telemetry(quiet: bool) -> Result<(), anyhow::Error> {
    let default_filter = if quiet { QUIET_FILTER } else { DEFAULT_FILTER };

    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(console_fmt)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
