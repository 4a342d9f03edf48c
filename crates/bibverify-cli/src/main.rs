use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

mod output;

use bibverify_core::db::arxiv::Arxiv;
use bibverify_core::db::crossref::Crossref;
use bibverify_core::CatalogBackend;
use output::ColorMode;

/// Verify BibTeX entries via Crossref / arXiv look-ups
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// BibTeX file to check
    bibfile: PathBuf,

    /// Minimum similarity [0-1] to mark an entry as OK
    #[arg(long, default_value_t = bibverify_core::DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.bibfile.exists() {
        anyhow::bail!("File {} does not exist.", cli.bibfile.display());
    }

    let entries = bibverify_bib::load_bib(&cli.bibfile)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", cli.bibfile.display(), e))?;

    // Env-var overrides: request timeout and Crossref polite-pool contact.
    let timeout_secs: u64 = std::env::var("CATALOG_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(bibverify_core::DEFAULT_TIMEOUT_SECS);
    let mailto = std::env::var("CROSSREF_MAILTO").ok();

    let client = reqwest::Client::new();
    let crossref = Crossref { mailto };
    let arxiv = Arxiv;
    let backends: [&dyn CatalogBackend; 2] = [&crossref, &arxiv];

    let verdicts = bibverify_core::verify_entries(
        &entries,
        &backends,
        &client,
        Duration::from_secs(timeout_secs),
        cli.threshold,
    )
    .await;

    let mut stdout = std::io::stdout();
    output::print_table(&mut stdout, &verdicts, ColorMode(!cli.no_color))?;

    Ok(())
}
