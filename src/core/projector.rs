use crate::domain::model::{ExportRecord, RawUserRecord};
use crate::domain::ports::ConfigProvider;

/// Maps raw user objects onto the configured export fields.
#[derive(Debug, Clone)]
pub struct Projector {
    fields: Vec<String>,
    include_emails: bool,
}

impl Projector {
    pub fn new(fields: Vec<String>, include_emails: bool) -> Self {
        Self {
            fields,
            include_emails,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.export_fields().to_vec(), config.include_emails())
    }

    /// Copies the configured fields verbatim, then numbers email entries from 1.
    pub fn project(&self, raw: &RawUserRecord) -> ExportRecord {
        let mut record = ExportRecord::new();

        for field in &self.fields {
            if let Some(value) = raw.get(field) {
                record.insert(field.as_str(), value.clone());
            }
        }

        if self.include_emails {
            for (idx, entry) in raw.emails().iter().enumerate() {
                let position = idx + 1;
                if let Some(address) = entry.get("address") {
                    record.insert(format!("mailAddress{}", position), address.clone());
                }
                if let Some(verified) = entry.get("verified") {
                    record.insert(format!("verifiedMailAddress{}", position), verified.clone());
                }
            }
        }

        record
    }
}
