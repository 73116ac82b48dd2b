use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use dist_check::config::{self, IgnoreList};
use dist_check::listing::cache::ListingCache;
use dist_check::listing::page::ListingSet;
use dist_check::metadata::fetcher::MetadataFetcher;
use dist_check::reconcile::engine::Reconciler;
use dist_check::reconcile::result::{ReconcileReport, ReconcileStatus};

#[derive(Parser)]
#[command(name = "dist-check")]
#[command(version, about = "Check release index pages against authoritative repository metadata")]
struct Cli {
    /// Configuration file with group and artifact records
    #[arg(long, default_value = "dist-check.conf")]
    config: PathBuf,

    /// Base URL of the authoritative repository
    #[arg(long, default_value = config::DEFAULT_REPO_BASE_URL)]
    repo_base_url: String,

    /// Suppress mismatch failures for `artifactId` or `artifactId:version`
    #[arg(long = "ignore", value_name = "ENTRY")]
    ignore: Vec<String>,

    /// File receiving one line per version mismatch
    #[arg(long, default_value = config::FAILURES_FILENAME)]
    failures_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let text = fs::read_to_string(&cli.config)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", cli.config.display()))?;
    let descriptors = config::read_configuration(&text)?;
    info!(
        "loaded {} artifact records from {}",
        descriptors.len(),
        cli.config.display()
    );

    let reconciler = Reconciler::new(
        MetadataFetcher::new(&cli.repo_base_url),
        ListingCache::new(),
        ListingSet::builtin(),
        IgnoreList::new(&cli.ignore),
    );

    let report = reconciler.run(&descriptors).await?;
    print_report(&report);

    if !report.error_lines.is_empty() {
        let mut lines = report.error_lines.join("\n");
        lines.push('\n');
        fs::write(&cli.failures_file, lines)?;
        info!(
            "wrote {} failure lines to {}",
            report.error_lines.len(),
            cli.failures_file.display()
        );
    }

    if report.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report(report: &ReconcileReport) {
    for (url, results) in &report.by_listing {
        println!("{url} ({} components)", results.len());
        for result in results {
            println!(
                "  {:<36} {:<12} {:<12} {}",
                result.descriptor.artifact_id(),
                result.authoritative_version.as_deref().unwrap_or("-"),
                result.listing_version.as_deref().unwrap_or("-"),
                status_label(result.status),
            );
        }
        println!();
    }
    for line in &report.error_lines {
        eprintln!("ERROR {line}");
    }
}

fn status_label(status: ReconcileStatus) -> &'static str {
    match status {
        ReconcileStatus::Match => "ok",
        ReconcileStatus::VersionMismatch => "version mismatch",
        ReconcileStatus::DateMismatch => "date drift",
        ReconcileStatus::NotFound => "not in index",
        ReconcileStatus::FetchError => "fetch error",
    }
}
