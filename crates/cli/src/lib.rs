use std::io::Write;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use subfetch_core::{Subtitle, SubtitleQuery};
use subfetch_subtitles::{
    DEFAULT_OPENSUBS_URL, DEFAULT_WIZDOM_URL, FetcherConfig, HttpTransport, SourceSelection,
    SubtitleFetcher,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "subfetch", version, about = "Look up online subtitles by IMDb id")]
pub struct Args {
    /// IMDb id of the movie or series (e.g. tt0903747)
    pub imdb_id: String,

    /// Season number, for series
    #[arg(short, long)]
    pub season: Option<u32>,

    /// Episode number, for series
    #[arg(short, long, requires = "season")]
    pub episode: Option<u32>,

    /// Providers to query: `wizdom` or `wizdom+opensubs`
    #[arg(long, env = "SUBFETCH_SOURCES", default_value = "wizdom+opensubs")]
    pub sources: SourceSelection,

    #[arg(long, env = "SUBFETCH_WIZDOM_URL", default_value = DEFAULT_WIZDOM_URL)]
    pub wizdom_url: String,

    #[arg(long, env = "SUBFETCH_OPENSUBS_URL", default_value = DEFAULT_OPENSUBS_URL)]
    pub opensubs_url: String,

    /// OpenSubtitles languages to keep (comma separated ISO 639-2 codes)
    #[arg(long, env = "SUBFETCH_LANGUAGES", value_delimiter = ',', default_values = ["eng", "heb"])]
    pub languages: Vec<String>,

    /// HTTP timeout per request
    #[arg(long, env = "SUBFETCH_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Emit logs as JSON on stderr
    #[arg(long, env = "SUBFETCH_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<label>\t<url>` per line
    Text,
    /// One JSON object per line
    Json,
}

impl Args {
    pub fn query(&self) -> SubtitleQuery {
        SubtitleQuery {
            external_id: self.imdb_id.clone(),
            season: self.season,
            episode: self.episode,
        }
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            sources: self.sources,
            wizdom_base_url: self.wizdom_url.clone(),
            opensubs_base_url: self.opensubs_url.clone(),
            accepted_languages: self.languages.clone(),
            timeout_secs: self.timeout_secs,
            ..Default::default()
        }
    }
}

pub fn render(subtitle: &Subtitle, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("{}\t{}", subtitle.language, subtitle.url)),
        OutputFormat::Json => {
            serde_json::to_string(subtitle).context("failed to serialize subtitle")
        }
    }
}

/// Stream every subtitle for `query` to `out`, one line each.
pub fn run<T: HttpTransport>(
    fetcher: &SubtitleFetcher<T>,
    query: &SubtitleQuery,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let mut written = 0;
    for subtitle in fetcher.subtitles(query) {
        writeln!(out, "{}", render(&subtitle, format)?).context("failed to write output")?;
        written += 1;
    }
    out.flush().context("failed to flush output")?;
    Ok(written)
}
