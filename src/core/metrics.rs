use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::TelemetrySettings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder. Without it every counter is a no-op.
pub(crate) fn init(telemetry: &TelemetrySettings) -> anyhow::Result<()> {
    if !telemetry.prometheus_enabled {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);

    metrics::describe_counter!("numbering_passes_total", "Numbering passes over a test definition");
    metrics::describe_counter!(
        "numbering_skipped_groups_total",
        "Question groups carried over without numbers"
    );
    metrics::describe_counter!("grading_overrides_total", "Manual grading override changes");

    tracing::debug!("Prometheus recorder installed");
    Ok(())
}

/// Text exposition of everything recorded so far, if the recorder is installed.
pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}
