mod cli;

use crate::cli::{Command, CLI};
use anyhow::Context;
use clap::Parser;
use s3link_allocator::{Allocator, AllocatorSettings, LinkAllocator};
use s3link_core::LookupKey;
use s3link_generator::{RandomGenerator, RandomGeneratorSettings};
use s3link_storage::{S3ObjectStore, S3Settings};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries only the short code; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = CLI::parse();

    info!(
        bucket = %config.bucket,
        region = %config.region,
        state_prefix = %config.state_prefix,
        link_prefix = %config.link_prefix,
        redirect_format = %config.redirect_format,
        "starting s3link"
    );

    match &config.command {
        Command::Get { key } => {
            let code = get(&config, key).await?;
            println!("{code}");
        }
    }

    Ok(())
}

async fn get(config: &CLI, key: &str) -> anyhow::Result<String> {
    let key = LookupKey::new(key)?;

    let store = S3ObjectStore::connect(S3Settings {
        bucket: config.bucket.clone(),
        region: config.region.clone(),
        endpoint: config.endpoint.clone(),
    })
    .await
    .context("failed to configure object store")?;

    let generator = RandomGenerator::new(
        RandomGeneratorSettings::builder()
            .length(config.identifier_length)
            .prefix(config.link_prefix.clone())
            .build(),
    )
    .context("invalid short code settings")?;

    let settings = AllocatorSettings::builder()
        .state_prefix(config.state_prefix.clone())
        .redirect_template(config.redirect_format.clone())
        .max_attempts(config.max_attempts)
        .build();

    let allocator = LinkAllocator::new(store, generator, settings)?;
    let code = allocator
        .allocate(&key)
        .await
        .with_context(|| format!("failed to allocate short code for '{key}'"))?;

    Ok(code.to_string())
}
