use tracing_subscriber::EnvFilter;

/// Initialize tracing from the CLI verbosity level.
///
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+       -> trace
///
/// `RUST_LOG` overrides the flag when set.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fx_vol_report={level},fxvol={level}")));

    // A second init (e.g. from tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
