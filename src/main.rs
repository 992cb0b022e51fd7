use anyhow::{Context, Result, bail};
use clap::Parser;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chunkscribe::cli::Cli;
use chunkscribe::config::Config;
use chunkscribe::download::resolve_source;
use chunkscribe::output::save_transcript;
use chunkscribe::remote::HttpRemoteTranscriber;
use chunkscribe::transcribe::transcribe;

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "chunkscribe=debug"
    } else if quiet {
        "chunkscribe=warn"
    } else {
        "chunkscribe=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Read the API token from the environment.
///
/// `REPLICATE_API_TOKEN` is accepted as a fallback for setups migrating
/// from the hosted-gateway configuration.
fn api_token() -> Result<String> {
    for key in ["CHUNKSCRIBE_API_TOKEN", "REPLICATE_API_TOKEN"] {
        if let Ok(token) = std::env::var(key)
            && !token.is_empty()
        {
            return Ok(token);
        }
    }
    bail!("CHUNKSCRIBE_API_TOKEN not set. Export the variable before running.")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    }
    .with_env_overrides();

    // CLI flags override file and environment
    if let Some(max_chunk) = cli.max_chunk {
        config.split.max_chunk_seconds = max_chunk;
    }
    if let Some(model) = cli.model.clone() {
        config.remote.model = model;
    }
    if let Some(output_dir) = cli.output_dir.clone() {
        config.output.transcripts_dir = output_dir;
    }
    config.validate()?;

    let token = api_token()?;
    let remote = HttpRemoteTranscriber::new(config.remote.base_url.clone(), token);

    let resolved = resolve_source(&cli.source, &config.split.temp_dir).await?;

    let start = Instant::now();
    let result = transcribe(&remote, &resolved.path, &config).await;

    // A downloaded source is temporary, remove it whatever the outcome
    if resolved.temporary {
        if let Err(e) = std::fs::remove_file(&resolved.path) {
            debug!("Failed to remove downloaded file: {}", e);
        }
    }

    let transcript = result?;
    info!("Completed in {:.1}s", start.elapsed().as_secs_f64());

    let text_path = save_transcript(
        &transcript.text,
        &cli.source,
        &config.output.transcripts_dir,
    )?;
    println!("{}", text_path.display());

    Ok(())
}
