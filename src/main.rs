use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use goreleaser_resolve::config::{self, DEFAULT_DISTRIBUTION, DEFAULT_VERSION, ResolverConfig};
use goreleaser_resolve::logging;
use goreleaser_resolve::release::resolver::ReleaseResolver;
use goreleaser_resolve::release::types::{Distribution, Release};

#[derive(Parser)]
#[command(name = "goreleaser-resolve")]
#[command(version, about = "Resolve a GoReleaser version specifier to a published release tag")]
struct Cli {
    /// Distribution to resolve (goreleaser or goreleaser-pro)
    #[arg(short, long, default_value = DEFAULT_DISTRIBUTION)]
    distribution: String,

    /// Exact tag, semver range, `latest` or `nightly`
    #[arg(short = 's', long = "spec", default_value = DEFAULT_VERSION)]
    version_spec: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the release feed, overrides the configuration file
    #[arg(long)]
    feed_url: Option<String>,

    /// Give up waiting for the resolution after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the release record as JSON instead of the bare tag
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<ResolverConfig> {
    let mut config = match &cli.config {
        Some(path) => ResolverConfig::from_file(path)?,
        None => ResolverConfig::default(),
    };
    if let Some(feed_url) = &cli.feed_url {
        config.feed_base_url = feed_url.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let resolver =
        ReleaseResolver::from_config(&config).context("Failed to create HTTP client")?;
    let distribution = Distribution::new(cli.distribution.as_str());

    let resolution = resolver.get_release(&distribution, &cli.version_spec);
    let release: Release = match cli.timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), resolution)
            .await
            .with_context(|| format!("Resolution timed out after {} seconds", secs))??,
        None => resolution.await?,
    };

    if cli.json {
        println!("{}", serde_json::to_string(&release)?);
    } else {
        println!("{}", release.tag_name);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&config::data_dir(), cli.verbose) {
        eprintln!("Logging disabled: {:#}", e);
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
