//! OpenSubtitles, through the Stremio v3 addon.
//!
//! `GET {base}/subtitles/movie/{id}.json` or
//! `GET {base}/subtitles/series/{id}:{season}:{episode}.json`, answering
//! `{ "subtitles": [{ "lang": "eng", "url": "https://..." }, ...] }`.

use serde::Deserialize;
use tracing::trace;

use crate::provider::SubtitleProvider;
use crate::{FetchError, ProviderKind, Subtitle, SubtitleQuery, join_url};

#[derive(Debug, Deserialize)]
struct OpenSubsResponse {
    subtitles: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OpenSubsItem {
    lang: Option<String>,
    url: Option<String>,
}

pub struct OpenSubsProvider {
    base_url: String,
    accepted_languages: Vec<String>,
}

impl OpenSubsProvider {
    pub fn new(base_url: impl Into<String>, accepted_languages: Vec<String>) -> Self {
        Self {
            base_url: base_url.into(),
            accepted_languages,
        }
    }

    fn accepts(&self, lang: &str) -> bool {
        self.accepted_languages.iter().any(|l| l == lang)
    }
}

impl SubtitleProvider for OpenSubsProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenSubtitles
    }

    fn build_url(&self, query: &SubtitleQuery) -> String {
        let path = match query.episode_number() {
            Some((season, episode)) => {
                format!("/subtitles/series/{}:{season}:{episode}.json", query.external_id)
            }
            None => format!("/subtitles/movie/{}.json", query.external_id),
        };
        join_url(&self.base_url, &path)
    }

    fn parse(&self, body: &str) -> Result<Vec<Subtitle>, FetchError> {
        let resp: OpenSubsResponse = serde_json::from_str(body)?;

        Ok(resp
            .subtitles
            .into_iter()
            .filter_map(|value| {
                let item = match serde_json::from_value::<OpenSubsItem>(value) {
                    Ok(item) => item,
                    Err(e) => {
                        trace!(error = %e, "skipping malformed opensubs item");
                        return None;
                    }
                };
                let (Some(lang), Some(url)) = (item.lang, item.url) else {
                    trace!("skipping opensubs item without lang or url");
                    return None;
                };
                if url.is_empty() || !self.accepts(&lang) {
                    return None;
                }
                Some(Subtitle::online(ProviderKind::OpenSubtitles, url, &lang))
            })
            .collect())
    }
}
