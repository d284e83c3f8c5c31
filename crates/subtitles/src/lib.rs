pub mod fetcher;
pub mod opensubs;
pub mod provider;
pub mod transport;
pub mod wizdom;

pub use fetcher::{SourceSelection, SubtitleFetcher, Subtitles};
pub use provider::SubtitleProvider;
pub use subfetch_core::{FetchError, ProviderKind, Subtitle, SubtitleQuery, SubtitleSource};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

pub const DEFAULT_WIZDOM_URL: &str = "https://wizdom.xyz/api";
pub const DEFAULT_OPENSUBS_URL: &str = "https://opensubtitles-v3.strem.io";

/// Fetcher and transport configuration.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub sources: SourceSelection,
    pub wizdom_base_url: String,
    pub opensubs_base_url: String,
    /// Literal language written on every Wizdom label.
    pub wizdom_label_language: String,
    /// OpenSubtitles language codes that are passed through.
    pub accepted_languages: Vec<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            sources: SourceSelection::WizdomThenOpenSubs,
            wizdom_base_url: DEFAULT_WIZDOM_URL.to_string(),
            opensubs_base_url: DEFAULT_OPENSUBS_URL.to_string(),
            wizdom_label_language: "eng".to_string(),
            accepted_languages: vec!["eng".to_string(), "heb".to_string()],
            timeout_secs: 15,
            user_agent: concat!("subfetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Joins a base URL and a path that starts with `/`.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}
