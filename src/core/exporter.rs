use crate::domain::model::{ExportBatch, ExportFormat};
use crate::domain::ports::Storage;
use crate::utils::error::{ExportError, Result};
use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Serializes a finished batch and hands it to storage as `<export_file>.<ext>`.
pub struct Exporter<S: Storage> {
    storage: S,
    export_file: String,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S, export_file: impl Into<String>) -> Self {
        Self {
            storage,
            export_file: export_file.into(),
        }
    }

    pub fn destination(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.export_file, format.extension())
    }

    pub async fn export(&self, batch: &ExportBatch, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => self.export_csv(batch).await,
            ExportFormat::Json => self.export_json(batch).await,
        }
    }

    pub async fn export_csv(&self, batch: &ExportBatch) -> Result<String> {
        let data = render_csv(batch)?;
        tracing::debug!("Rendered {} records as CSV ({} bytes)", batch.len(), data.len());
        self.storage
            .write_file(&self.destination(ExportFormat::Csv), &data)
            .await
    }

    pub async fn export_json(&self, batch: &ExportBatch) -> Result<String> {
        let data = render_json(batch)?;
        tracing::debug!("Rendered {} records as JSON ({} bytes)", batch.len(), data.len());
        self.storage
            .write_file(&self.destination(ExportFormat::Json), &data)
            .await
    }
}

/// Header is the column union of all records; cells a record lacks stay empty.
/// Users that projected to no fields at all cannot be represented and are rejected.
pub fn render_csv(batch: &ExportBatch) -> Result<Vec<u8>> {
    let columns = batch.columns();
    if columns.is_empty() {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        return Err(ExportError::ConfigError {
            message: format!(
                "None of the configured fields were present in the {} fetched users",
                batch.len()
            ),
        });
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(&columns)?;
    for record in batch {
        let row = columns
            .iter()
            .map(|column| record.get(column).map(cell_text).unwrap_or_default());
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::IoError(e.into_error()))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
    }
}

/// Tab-indented array of objects.
pub fn render_json(batch: &ExportBatch) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut data, PrettyFormatter::with_indent(b"\t"));
    batch.serialize(&mut serializer)?;
    Ok(data)
}
