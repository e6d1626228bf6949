/// Cloud Storage bucket listing sample
use clap::Parser;
use log::{error, info};
use thiserror::Error;

mod auth;
mod config;
mod storage;
mod xml;

/// List the contents of a Google Cloud Storage bucket as pretty-printed XML,
/// authenticated with a service account key.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// E-mail address of the service account.
    #[arg(long, default_value = config::SERVICE_ACCOUNT_EMAIL)]
    service_account: String,

    /// Name of the bucket to list.
    #[arg(long, default_value = config::BUCKET_NAME)]
    bucket: String,

    /// Path to the service account key file.
    #[arg(long, default_value = config::KEY_FILE)]
    key_file: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(#[from] config::Error),

    #[error("credentials: {0}")]
    Auth(#[from] auth::Error),

    #[error("storage request: {0}")]
    Storage(#[from] storage::Error),

    #[error("format listing: {0}")]
    Xml(#[from] xml::Error),
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(_) => std::process::exit(0),
        Err(err) => {
            error!("fatal: {}", err.to_string());
            std::process::exit(1)
        }
    }
}

async fn run() -> Result<(), Error> {
    env_logger::init();

    let args = Cli::parse();
    let cfg = config::Config::try_new(args.service_account, args.bucket, args.key_file)?;

    info!("Listing bucket {} as {}", cfg.bucket_name, cfg.service_account);

    let token = auth::token(&cfg).await?;
    let listing = storage::list_bucket(config::STORAGE_ENDPOINT, &cfg.bucket_name, &token).await?;

    if let Some(count) = xml::object_count(&listing) {
        info!("{count} objects in bucket");
    }

    let pretty = xml::pretty_print(&listing)?;
    println!("{}", render_listing(&cfg.bucket_name, &pretty));
    Ok(())
}

fn render_listing(bucket: &str, body: &str) -> String {
    format!("\nBucket listing for {bucket}:\n\n{body}")
}
