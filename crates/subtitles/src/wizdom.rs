//! Wizdom subtitle index.
//!
//! `GET {base}/search?action=by_id&imdb={id}[&season={s}&episode={e}]` returns a
//! JSON array of `{ id, versioname, score }`. Files are served from
//! `{base}/files/sub/{id}`. The payload carries no usable language, so every
//! record gets the same configured label.

use serde::Deserialize;
use tracing::trace;

use crate::provider::SubtitleProvider;
use crate::{FetchError, ProviderKind, Subtitle, SubtitleQuery, join_url};

#[derive(Debug, Deserialize)]
struct WizdomItem {
    id: u64,
    versioname: Option<String>,
    score: Option<i64>,
}

pub struct WizdomProvider {
    base_url: String,
    label_language: String,
}

impl WizdomProvider {
    pub fn new(base_url: impl Into<String>, label_language: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            label_language: label_language.into(),
        }
    }

    pub fn file_url(&self, id: u64) -> String {
        join_url(&self.base_url, &format!("/files/sub/{id}"))
    }
}

impl SubtitleProvider for WizdomProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Wizdom
    }

    fn build_url(&self, query: &SubtitleQuery) -> String {
        let mut action = format!("by_id&imdb={}", query.external_id);
        if let Some(season) = query.season {
            action.push_str(&format!("&season={season}"));
            if let Some(episode) = query.episode {
                action.push_str(&format!("&episode={episode}"));
            }
        }
        join_url(&self.base_url, &format!("/search?action={action}"))
    }

    fn parse(&self, body: &str) -> Result<Vec<Subtitle>, FetchError> {
        let items: Vec<serde_json::Value> = serde_json::from_str(body)?;

        Ok(items
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<WizdomItem>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    trace!(error = %e, "skipping malformed wizdom item");
                    None
                }
            })
            .map(|item| {
                trace!(
                    id = item.id,
                    release = item.versioname.as_deref().unwrap_or(""),
                    score = item.score,
                    "wizdom item"
                );
                Subtitle::online(
                    ProviderKind::Wizdom,
                    self.file_url(item.id),
                    &self.label_language,
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SubtitleSource;

    fn provider() -> WizdomProvider {
        WizdomProvider::new("https://wizdom.xyz/api", "eng")
    }

    #[test]
    fn movie_url_has_no_season_params() {
        let url = provider().build_url(&SubtitleQuery::movie("tt0111161"));
        assert_eq!(url, "https://wizdom.xyz/api/search?action=by_id&imdb=tt0111161");
        assert!(!url.contains("season="));
        assert!(!url.contains("episode="));
    }

    #[test]
    fn episode_url_appends_season_and_episode() {
        let url = provider().build_url(&SubtitleQuery::episode("tt0903747", 3, 7));
        assert!(url.contains("by_id&imdb=tt0903747"));
        assert!(url.ends_with("&season=3&episode=7"));
    }

    #[test]
    fn season_without_episode_omits_episode_param() {
        let query = SubtitleQuery {
            external_id: "tt0903747".into(),
            season: Some(2),
            episode: None,
        };
        let url = provider().build_url(&query);
        assert!(url.ends_with("&season=2"));
        assert!(!url.contains("episode="));
    }

    #[test]
    fn malformed_id_is_passed_through() {
        let url = provider().build_url(&SubtitleQuery::movie("not an id"));
        assert!(url.ends_with("imdb=not an id"));
    }

    #[test]
    fn trailing_slash_on_base_is_trimmed() {
        let p = WizdomProvider::new("http://localhost:9000/api/", "eng");
        assert_eq!(p.file_url(12), "http://localhost:9000/api/files/sub/12");
    }

    #[test]
    fn parse_maps_every_item_in_order() {
        let body = serde_json::json!([
            { "id": 301, "versioname": "Movie.2020.1080p.BluRay", "score": 9 },
            { "id": 17, "versioname": "Movie.2020.WEB-DL", "score": 4 },
            { "id": 5, "versioname": "Movie.2020.HDTV", "score": 0 }
        ])
        .to_string();

        let subs = provider().parse(&body).unwrap();
        let urls: Vec<_> = subs.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://wizdom.xyz/api/files/sub/301",
                "https://wizdom.xyz/api/files/sub/17",
                "https://wizdom.xyz/api/files/sub/5",
            ]
        );
        assert!(subs.iter().all(|s| s.language == "[Wizdom] eng"));
        assert!(subs.iter().all(|s| s.source == SubtitleSource::Online));
    }

    #[test]
    fn label_ignores_payload_language() {
        let body = r#"[{ "id": 1, "versioname": "x", "score": 1, "lang": "heb" }]"#;
        let subs = provider().parse(body).unwrap();
        assert_eq!(subs[0].language, "[Wizdom] eng");
    }

    #[test]
    fn items_without_id_are_skipped() {
        let body = serde_json::json!([
            { "id": 1, "versioname": "Show.S01E01.720p", "score": 5 },
            { "versioname": "no id", "score": 2 },
            "garbage",
            { "id": "seven", "versioname": "bad id", "score": 1 },
            { "id": 3, "versioname": "Show.S01E01.1080p", "score": 7 }
        ])
        .to_string();

        let subs = provider().parse(&body).unwrap();
        let urls: Vec<_> = subs.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://wizdom.xyz/api/files/sub/1",
                "https://wizdom.xyz/api/files/sub/3",
            ]
        );
    }

    #[test]
    fn null_or_missing_release_fields_are_tolerated() {
        let body = serde_json::json!([
            { "id": 1, "versioname": null, "score": 1 },
            { "id": 3, "score": null },
            { "id": 4 }
        ])
        .to_string();
        let subs = provider().parse(&body).unwrap();
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[2].url, "https://wizdom.xyz/api/files/sub/4");
    }

    #[test]
    fn parse_rejects_non_array() {
        let err = provider().parse(r#"{"error":"not found"}"#).unwrap_err();
        assert_eq!(err.code(), "decode");
    }

    #[test]
    fn parse_rejects_truncated_body() {
        let err = provider().parse(r#"[{"id": 1, "versio"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
