use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use upload_presign::{presign_upload, UploadTarget};

#[derive(Parser)]
#[command(
    name = "presign_upload",
    about = "Print a presigned URL authorizing one PUT upload, valid for one hour"
)]
struct Cli {
    /// Destination bucket name
    bucket: String,
    /// Destination object key
    key: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&aws_config);

    let url = presign_upload(
        &client,
        &UploadTarget {
            bucket: cli.bucket,
            key: cli.key,
        },
    )
    .await?;
    println!("{url}");
    Ok(())
}
