use std::path::PathBuf;

use clap::Parser;

mod output;

use output::ColorMode;

/// Collect per-venue, per-year rankings of the most-cited software
/// engineering papers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the metadata, citation and ranking caches
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// First year to collect (inclusive)
    #[arg(long)]
    from_year: Option<i32>,

    /// Last year to collect (inclusive)
    #[arg(long)]
    until_year: Option<i32>,

    /// Semantic Scholar API key
    #[arg(long)]
    s2_api_key: Option<String>,

    /// Contact email for the Crossref polite pool
    #[arg(long)]
    crossref_mailto: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let file = citerank_core::config_file::load_config();

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let s2_api_key = cli
        .s2_api_key
        .or_else(|| std::env::var("S2_API_KEY").ok())
        .or_else(|| file.api_keys.as_ref().and_then(|a| a.s2_api_key.clone()));
    let crossref_mailto = cli
        .crossref_mailto
        .or_else(|| std::env::var("CROSSREF_MAILTO").ok())
        .or_else(|| {
            file.api_keys
                .as_ref()
                .and_then(|a| a.crossref_mailto.clone())
        });
    let cache_dir = cli
        .cache_dir
        .or_else(|| {
            file.storage
                .as_ref()
                .and_then(|s| s.cache_dir.clone())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from("cache"));

    let defaults = citerank_core::Config::default();
    let from_year = cli
        .from_year
        .or_else(|| file.collection.as_ref().and_then(|c| c.from_year))
        .unwrap_or(defaults.from_year);
    let until_year = cli
        .until_year
        .or_else(|| file.collection.as_ref().and_then(|c| c.until_year))
        .unwrap_or(defaults.until_year);
    if from_year > until_year {
        anyhow::bail!("--from-year {} is after --until-year {}", from_year, until_year);
    }

    let config = citerank_core::Config {
        s2_api_key,
        crossref_mailto,
        cache_dir,
        from_year,
        until_year,
    };

    let color = ColorMode(!cli.no_color);
    let orchestrator = citerank_core::build_pipeline(&config)?;
    let summaries = orchestrator.collect(config.from_year, config.until_year).await?;

    let mut stdout = std::io::stdout();
    output::print_summary(&mut stdout, &summaries, color)?;
    Ok(())
}
