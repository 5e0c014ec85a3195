use export_core::config::ExportConfig;
use export_core::contract::{ExportRequest, ExportRunSummary};
use tracing::{debug, info};

use crate::adapters::clock::ExportClock;
use crate::adapters::exporter::TableExporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportHandlerError {
    pub message: String,
    pub table_arn: Option<String>,
}

impl std::fmt::Display for ExportHandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExportHandlerError {}

/// Triggers one point-in-time export per configured table, strictly in list
/// order. The first failing export aborts the run; exports that were already
/// accepted stay in place.
pub fn handle_export_request(
    config: &ExportConfig,
    exporter: &impl TableExporter,
    clock: &impl ExportClock,
) -> Result<ExportRunSummary, ExportHandlerError> {
    debug!(
        bucket_mode = ?config.bucket_mode,
        s3_bucket = %config.bucket,
        table_arns = ?config.table_arns,
        "resolved export configuration"
    );

    let mut exports = Vec::with_capacity(config.table_arns.len());
    for table_arn in &config.table_arns {
        let request = ExportRequest::for_table(table_arn, &config.bucket, clock.today())
            .map_err(|error| ExportHandlerError {
                message: error.message().to_string(),
                table_arn: Some(table_arn.clone()),
            })?;

        info!(
            table_arn = %request.table_arn,
            s3_bucket = %request.s3_bucket,
            s3_prefix = %request.s3_prefix,
            "triggering table export"
        );
        let receipt = exporter
            .export_table(&request)
            .map_err(|message| ExportHandlerError {
                message,
                table_arn: Some(table_arn.clone()),
            })?;
        info!(
            table_arn = %receipt.table_arn,
            export_arn = receipt.export_arn.as_deref().unwrap_or("-"),
            export_status = receipt.export_status.as_deref().unwrap_or("-"),
            "table export accepted"
        );
        exports.push(receipt);
    }

    info!(exports = exports.len(), "exports done");
    Ok(ExportRunSummary::triggered(exports))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use export_core::config::{BucketMode, ExportConfig};
    use export_core::contract::ExportReceipt;

    use super::*;

    const ORDERS_ARN: &str = "arn:aws:dynamodb:us-east-1:111:table/Orders";
    const USERS_ARN: &str = "arn:aws:dynamodb:us-east-1:111:table/Users";

    struct RecordingExporter {
        requests: Mutex<Vec<ExportRequest>>,
        failing_table: Option<&'static str>,
    }

    impl RecordingExporter {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                failing_table: None,
            }
        }

        fn failing_on(table_arn: &'static str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                failing_table: Some(table_arn),
            }
        }

        fn requests(&self) -> Vec<ExportRequest> {
            self.requests.lock().expect("poisoned mutex").clone()
        }
    }

    impl TableExporter for RecordingExporter {
        fn export_table(&self, request: &ExportRequest) -> Result<ExportReceipt, String> {
            self.requests
                .lock()
                .expect("poisoned mutex")
                .push(request.clone());
            if self.failing_table == Some(request.table_arn.as_str()) {
                return Err(format!(
                    "simulated export failure for table: {}",
                    request.table_arn
                ));
            }
            Ok(ExportReceipt {
                table_arn: request.table_arn.clone(),
                export_arn: Some(format!("{}/export/0001", request.table_arn)),
                export_status: Some("IN_PROGRESS".to_string()),
            })
        }
    }

    struct FixedClock(NaiveDate);

    impl ExportClock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    /// Advances one day per reading.
    struct SteppingClock {
        next: Cell<NaiveDate>,
    }

    impl ExportClock for SteppingClock {
        fn today(&self) -> NaiveDate {
            let current = self.next.get();
            self.next.set(current.succ_opt().expect("date in range"));
            current
        }
    }

    fn march_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    fn config_with(table_arns: &[&str]) -> ExportConfig {
        ExportConfig {
            bucket_mode: BucketMode::ResourceName,
            bucket: "arn:aws:s3:::my-bucket".to_string(),
            table_arns: table_arns.iter().map(|arn| arn.to_string()).collect(),
        }
    }

    #[test]
    fn exports_each_table_in_list_order() {
        let exporter = RecordingExporter::new();
        let vars = HashMap::from([
            ("S3_BUCKET_ARN", "arn:aws:s3:::my-bucket".to_string()),
            ("DYNAMODB_TABLE_ARNS", format!("{ORDERS_ARN},{USERS_ARN}")),
        ]);
        let config = ExportConfig::from_lookup(|name| vars.get(name).cloned())
            .expect("config should resolve");

        let summary = handle_export_request(&config, &exporter, &FixedClock(march_first()))
            .expect("exports should succeed");

        let requests = exporter.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].table_arn, ORDERS_ARN);
        assert_eq!(requests[0].s3_prefix, "Orders/2024-03-01");
        assert_eq!(requests[1].table_arn, USERS_ARN);
        assert_eq!(requests[1].s3_prefix, "Users/2024-03-01");
        assert!(requests
            .iter()
            .all(|request| request.s3_bucket == "arn:aws:s3:::my-bucket"
                && request.export_format == "DYNAMODB_JSON"));

        assert_eq!(summary.status, "exports_triggered");
        assert_eq!(summary.exports.len(), 2);
        assert_eq!(summary.exports[1].table_arn, USERS_ARN);
    }

    #[test]
    fn plain_bucket_name_is_passed_through() {
        let exporter = RecordingExporter::new();
        let config = ExportConfig {
            bucket_mode: BucketMode::PlainName,
            bucket: "my-bucket".to_string(),
            table_arns: vec![ORDERS_ARN.to_string()],
        };

        handle_export_request(&config, &exporter, &FixedClock(march_first()))
            .expect("export should succeed");

        assert_eq!(exporter.requests()[0].s3_bucket, "my-bucket");
    }

    #[test]
    fn failed_export_stops_remaining_tables() {
        let exporter = RecordingExporter::failing_on(ORDERS_ARN);
        let config = config_with(&[ORDERS_ARN, USERS_ARN]);

        let error = handle_export_request(&config, &exporter, &FixedClock(march_first()))
            .expect_err("first export failure should abort");

        assert_eq!(error.table_arn.as_deref(), Some(ORDERS_ARN));
        assert!(error.message.contains("simulated export failure"));
        let requests = exporter.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].table_arn, ORDERS_ARN);
    }

    #[test]
    fn date_is_read_for_every_table() {
        let exporter = RecordingExporter::new();
        let config = config_with(&[ORDERS_ARN, USERS_ARN]);
        let clock = SteppingClock {
            next: Cell::new(march_first()),
        };

        handle_export_request(&config, &exporter, &clock).expect("exports should succeed");

        let prefixes: Vec<String> = exporter
            .requests()
            .into_iter()
            .map(|request| request.s3_prefix)
            .collect();
        assert_eq!(prefixes, vec!["Orders/2024-03-01", "Users/2024-03-02"]);
    }

    #[test]
    fn malformed_identifier_fails_before_export() {
        let exporter = RecordingExporter::new();
        let config = config_with(&["Orders"]);

        let error = handle_export_request(&config, &exporter, &FixedClock(march_first()))
            .expect_err("bare identifier should fail");

        assert_eq!(error.table_arn.as_deref(), Some("Orders"));
        assert!(exporter.requests().is_empty());
    }

    #[test]
    fn missing_table_list_never_reaches_exporter() {
        let exporter = RecordingExporter::new();
        let vars = HashMap::from([("S3_BUCKET_ARN", "arn:aws:s3:::my-bucket".to_string())]);

        let result = ExportConfig::from_lookup(|name| vars.get(name).cloned())
            .map_err(|error| error.message().to_string())
            .and_then(|config| {
                handle_export_request(&config, &exporter, &FixedClock(march_first()))
                    .map_err(|error| error.message)
            });

        assert_eq!(
            result.expect_err("missing tables should fail"),
            "DYNAMODB_TABLE_ARNS must be configured"
        );
        assert!(exporter.requests().is_empty());
    }
}
