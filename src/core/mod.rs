pub mod engine;
pub mod exporter;
pub mod paginator;
pub mod projector;

pub use crate::domain::model::{ExportBatch, ExportFormat, ExportRecord, RawUserRecord};
pub use crate::domain::ports::{ConfigProvider, Storage, UserDirectory};
pub use crate::utils::error::Result;
