//! Miscellaneous

mod hints;

pub(crate) use hints::unlikely_elem;

/// Registers a global `tracing` subscriber that writes formatted events to `stderr`.
///
/// Directives are read from the `RUST_LOG` environment variable. `fallback_opt` is used when the
/// variable is absent or invalid.
#[cfg(feature = "_tracing-subscriber")]
pub fn tracing_subscriber_init(fallback_opt: Option<&str>) -> crate::Result<()> {
  use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
  let fallback = fallback_opt.unwrap_or("");
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  let fmt_layer = fmt::layer()
    .with_target(true)
    .with_thread_ids(true)
    .with_thread_names(true)
    .with_writer(std::io::stderr);
  tracing_subscriber::Registry::default().with(env_filter).with(fmt_layer).try_init()?;
  Ok(())
}
