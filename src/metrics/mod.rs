use once_cell::sync::OnceCell;
use std::error::Error;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROM_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialise the global Prometheus recorder and expose a handle that allows
/// rendering metrics in the Prometheus exposition format.
///
/// Call once at programme start, before any metrics are emitted. Calling it
/// again after the first success is a no-op.
pub fn init() -> Result<(), Box<dyn Error + Send + Sync>> {
    if PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

/// Global Prometheus handle, `None` until [`init`] has run.
pub fn handle() -> Option<&'static PrometheusHandle> {
    PROM_HANDLE.get()
}

/// Render current metrics, or an empty body when no recorder is installed.
pub fn render() -> String {
    handle().map(|h| h.render()).unwrap_or_default()
}
