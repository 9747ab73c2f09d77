//! Smoke check for the Firebase Admin bootstrap
//!
//! Run with: cargo run -- --config admin.toml --token

use anyhow::Context;
use clap::Parser;
use firebase_admin_bootstrap::{initialize_app, logging, AdminConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// TOML file with credentials_path, app_name and app options.
    #[clap(long)]
    config: Option<PathBuf>,

    /// Also fetch an OAuth2 access token (requires network access).
    #[clap(long)]
    token: bool,

    /// Log filter used when RUST_LOG is unset (e.g. "debug").
    #[clap(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing(&args.log_level);

    let config = match &args.config {
        Some(path) => AdminConfig::from_toml_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => AdminConfig::default(),
    };

    println!("Credentials: {}", config.credentials_path.display());

    let app = initialize_app(&config).context("initialize Firebase app")?;

    println!("App:              {}", app.name());
    println!("Instance:         {}", app.instance_id());
    println!("Project:          {}", app.project_id().unwrap_or("<none>"));
    println!("Service account:  {}", app.service_account_email());
    println!("Initialized at:   {}", app.initialized_at().to_rfc3339());

    if args.token {
        let token = app.access_token().await.context("fetch access token")?;
        println!("Access token:     {} chars", token.len());
    }

    Ok(())
}
