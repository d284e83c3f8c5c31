use anyhow::Context;
use clap::Parser;
use subfetch_cli::{Args, run};
use subfetch_subtitles::SubtitleFetcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = args.fetcher_config();
    info!(sources = %config.sources, timeout_secs = config.timeout_secs, "starting lookup");

    let fetcher = SubtitleFetcher::from_config(&config).context("failed to build HTTP client")?;

    let query = args.query();
    let stdout = std::io::stdout();
    let written = run(&fetcher, &query, args.format, &mut stdout.lock())?;
    info!(imdb_id = %query.external_id, written, "lookup complete");

    Ok(())
}
