use serde::Serialize;

/// A lookup request: an external id plus optional season/episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleQuery {
    pub external_id: String,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl SubtitleQuery {
    pub fn movie(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            season: None,
            episode: None,
        }
    }

    pub fn episode(external_id: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            external_id: external_id.into(),
            season: Some(season),
            episode: Some(episode),
        }
    }

    /// Season and episode, when both are set.
    pub fn episode_number(&self) -> Option<(u32, u32)> {
        self.season.zip(self.episode)
    }
}

/// Where a subtitle comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtitleSource {
    Online,
}

impl SubtitleSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
        }
    }
}

impl std::fmt::Display for SubtitleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subtitle-index service a record originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Wizdom,
    OpenSubtitles,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wizdom => "wizdom",
            Self::OpenSubtitles => "opensubs",
        }
    }

    /// Tag prefixed to every language label this provider emits.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Wizdom => "Wizdom",
            Self::OpenSubtitles => "OpenSubs",
        }
    }

    /// `[Tag] language`
    pub fn label(self, language: &str) -> String {
        format!("[{}] {language}", self.tag())
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized subtitle record, the same shape for every provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtitle {
    pub url: String,
    /// Human label, provider-tagged (e.g. `[Wizdom] eng`).
    pub language: String,
    pub source: SubtitleSource,
}

impl Subtitle {
    pub fn online(provider: ProviderKind, url: String, language: &str) -> Self {
        Self {
            url,
            language: provider.label(language),
            source: SubtitleSource::Online,
        }
    }
}
