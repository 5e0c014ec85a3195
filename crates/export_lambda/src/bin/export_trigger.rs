use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::ExportFormat;
use export_core::config::ExportConfig;
use export_core::contract::{ExportReceipt, ExportRequest, ExportRunSummary};
use export_lambda::adapters::clock::SystemClock;
use export_lambda::adapters::exporter::TableExporter;
use export_lambda::handlers::export::handle_export_request;
use lambda_runtime::{service_fn, tracing, Error, LambdaEvent};
use serde_json::Value;

struct DynamoDbTableExporter {
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl TableExporter for DynamoDbTableExporter {
    fn export_table(&self, request: &ExportRequest) -> Result<ExportReceipt, String> {
        let client = self.dynamodb_client.clone();
        let request = request.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = match client
                    .export_table_to_point_in_time()
                    .table_arn(&request.table_arn)
                    .s3_bucket(&request.s3_bucket)
                    .s3_prefix(&request.s3_prefix)
                    .export_format(ExportFormat::from(request.export_format.as_str()))
                    .send()
                    .await
                {
                    Ok(value) => value,
                    Err(error) => {
                        return Err(format!(
                            "failed to export table {}: {}",
                            request.table_arn,
                            DisplayErrorContext(&error)
                        ));
                    }
                };
                tracing::info!(response = ?output, "DynamoDB export response");

                let description = output.export_description();
                Ok(ExportReceipt {
                    table_arn: request.table_arn,
                    export_arn: description
                        .and_then(|value| value.export_arn())
                        .map(str::to_string),
                    export_status: description
                        .and_then(|value| value.export_status())
                        .map(|status| status.as_str().to_string()),
                })
            })
        })
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    exporter: &DynamoDbTableExporter,
) -> Result<ExportRunSummary, Error> {
    let LambdaEvent { payload, context, .. } = event;
    tracing::debug!(event = %payload, "received export event");
    tracing::debug!(
        request_id = %context.request_id,
        function_arn = %context.invoked_function_arn,
        "invocation context"
    );

    let config = ExportConfig::from_env()?;
    let summary = handle_export_request(&config, exporter, &SystemClock)?;
    Ok(summary)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let exporter = DynamoDbTableExporter {
        dynamodb_client: aws_sdk_dynamodb::Client::new(&aws_config),
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &exporter))).await
}
