use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A user object as returned by the list endpoint. Field order is kept as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawUserRecord {
    pub data: Map<String, Value>,
}

impl RawUserRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Email entries in server order. Absent or non-array `emails` yields nothing.
    pub fn emails(&self) -> &[Value] {
        match self.data.get("emails") {
            Some(Value::Array(entries)) => entries,
            _ => &[],
        }
    }
}

/// Flat, field-selected representation of one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportRecord {
    pub data: Map<String, Value>,
}

impl ExportRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.data.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.data.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Every record of one run, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportBatch {
    records: Vec<ExportRecord>,
}

impl ExportBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ExportRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExportRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ExportRecord] {
        &self.records
    }

    /// Union of field names over all records, in order of first appearance.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in &self.records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }
}

impl Extend<ExportRecord> for ExportBatch {
    fn extend<I: IntoIterator<Item = ExportRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FromIterator<ExportRecord> for ExportBatch {
    fn from_iter<I: IntoIterator<Item = ExportRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ExportBatch {
    type Item = ExportRecord;
    type IntoIter = std::vec::IntoIter<ExportRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExportBatch {
    type Item = &'a ExportRecord;
    type IntoIter = std::slice::Iter<'a, ExportRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One response of the list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<RawUserRecord>,
    pub total: usize,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

/// Credentials obtained from a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub auth_token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("auth_token", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}
