pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{LocalStorage, RocketChatClient};
pub use crate::config::export_config::ExportConfig;
pub use crate::core::{
    engine::{ExportEngine, ExportSummary},
    exporter::Exporter,
    paginator::Paginator,
    projector::Projector,
};
pub use crate::domain::model::{
    ExportBatch, ExportFormat, ExportRecord, RawUserRecord, Session, UsersPage,
};
pub use crate::utils::error::{ExportError, Result};
