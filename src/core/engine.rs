use crate::core::exporter::Exporter;
use crate::core::paginator::Paginator;
use crate::core::projector::Projector;
use crate::domain::model::ExportFormat;
use crate::domain::ports::{ConfigProvider, Storage, UserDirectory};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: String,
    pub records: usize,
    pub format: ExportFormat,
}

/// Runs one export: login, fetch every page, write the file.
pub struct ExportEngine<D: UserDirectory, S: Storage, C: ConfigProvider> {
    directory: D,
    exporter: Exporter<S>,
    config: C,
    monitor: SystemMonitor,
}

impl<D: UserDirectory, S: Storage, C: ConfigProvider> ExportEngine<D, S, C> {
    pub fn new(directory: D, storage: S, config: C) -> Self {
        Self::new_with_monitoring(directory, storage, config, false)
    }

    pub fn new_with_monitoring(directory: D, storage: S, config: C, monitor: bool) -> Self {
        let exporter = Exporter::new(storage, config.export_file());
        Self {
            directory,
            exporter,
            config,
            monitor: SystemMonitor::new(monitor),
        }
    }

    pub async fn run(&self, format: ExportFormat) -> Result<ExportSummary> {
        tracing::info!("🚀 Starting user export");

        let session = self
            .directory
            .authenticate(self.config.username(), self.config.password())
            .await?;
        self.monitor.log_phase("Authenticated", 0);

        let projector = Projector::from_config(&self.config);
        let paginator = Paginator::new(&self.directory, &projector, self.config.page_size());
        let batch = paginator.fetch_all(&session).await?;
        self.monitor.log_phase("Fetched", batch.len());

        let path = self.exporter.export(&batch, format).await?;
        self.monitor.log_phase("Exported", batch.len());

        tracing::info!("📁 Wrote {} users as {} to {}", batch.len(), format, path);
        Ok(ExportSummary {
            path,
            records: batch.len(),
            format,
        })
    }
}
