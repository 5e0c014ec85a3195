use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::destination::{export_prefix, table_short_name};

/// DynamoDB JSON, the data store's native portable export format.
pub const EXPORT_FORMAT: &str = "DYNAMODB_JSON";
pub const RUN_STATUS_TRIGGERED: &str = "exports_triggered";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRequest {
    pub table_arn: String,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub export_format: String,
}

impl ExportRequest {
    pub fn for_table(table_arn: &str, s3_bucket: &str, date: NaiveDate) -> Result<Self, ConfigError> {
        let short_name = table_short_name(table_arn).ok_or_else(|| {
            ConfigError::new(format!(
                "Table identifier '{table_arn}' has no table name after '/'"
            ))
        })?;

        Ok(Self {
            table_arn: table_arn.to_string(),
            s3_bucket: s3_bucket.to_string(),
            s3_prefix: export_prefix(short_name, date),
            export_format: EXPORT_FORMAT.to_string(),
        })
    }
}

/// Identifying fields of the export job the data store accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportReceipt {
    pub table_arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRunSummary {
    pub status: String,
    pub exports: Vec<ExportReceipt>,
}

impl ExportRunSummary {
    pub fn triggered(exports: Vec<ExportReceipt>) -> Self {
        Self {
            status: RUN_STATUS_TRIGGERED.to_string(),
            exports,
        }
    }
}
