//! Subtitle fetcher: runs the configured providers in order and yields
//! normalized records one at a time.
//!
//! Rules:
//! 1. Sources run strictly in sequence; the next source's request is only
//!    issued once every record of the previous one has been pulled.
//! 2. A failing source (transport, status, empty body, decode) is logged and
//!    skipped. It never stops the sources after it.
//! 3. Records keep payload order. Nothing is batched or deduplicated.

use std::iter::FusedIterator;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::opensubs::OpenSubsProvider;
use crate::provider::SubtitleProvider;
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::wizdom::WizdomProvider;
use crate::{FetchError, FetcherConfig, ProviderKind, Subtitle, SubtitleQuery};

/// Which providers to query, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSelection {
    WizdomOnly,
    WizdomThenOpenSubs,
}

impl SourceSelection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WizdomOnly => "wizdom",
            Self::WizdomThenOpenSubs => "wizdom+opensubs",
        }
    }

    pub fn providers(self) -> &'static [ProviderKind] {
        match self {
            Self::WizdomOnly => &[ProviderKind::Wizdom],
            Self::WizdomThenOpenSubs => &[ProviderKind::Wizdom, ProviderKind::OpenSubtitles],
        }
    }
}

impl std::fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wizdom" | "wizdom-only" => Ok(Self::WizdomOnly),
            "wizdom+opensubs" | "all" => Ok(Self::WizdomThenOpenSubs),
            other => Err(format!(
                "unknown source selection '{other}' (expected 'wizdom' or 'wizdom+opensubs')"
            )),
        }
    }
}

pub struct SubtitleFetcher<T> {
    transport: T,
    sources: SourceSelection,
    wizdom: WizdomProvider,
    opensubs: OpenSubsProvider,
}

impl SubtitleFetcher<ReqwestTransport> {
    /// Fetcher over a reqwest client built from `config`.
    pub fn from_config(config: &FetcherConfig) -> Result<Self, FetchError> {
        Ok(Self::new(ReqwestTransport::new(config)?, config))
    }
}

impl<T: HttpTransport> SubtitleFetcher<T> {
    pub fn new(transport: T, config: &FetcherConfig) -> Self {
        Self {
            transport,
            sources: config.sources,
            wizdom: WizdomProvider::new(
                config.wizdom_base_url.clone(),
                config.wizdom_label_language.clone(),
            ),
            opensubs: OpenSubsProvider::new(
                config.opensubs_base_url.clone(),
                config.accepted_languages.clone(),
            ),
        }
    }

    fn provider(&self, kind: ProviderKind) -> &dyn SubtitleProvider {
        match kind {
            ProviderKind::Wizdom => &self.wizdom,
            ProviderKind::OpenSubtitles => &self.opensubs,
        }
    }

    /// Query a single provider, surfacing its failure.
    pub fn fetch_source(
        &self,
        kind: ProviderKind,
        query: &SubtitleQuery,
    ) -> Result<Vec<Subtitle>, FetchError> {
        self.provider(kind).fetch(&self.transport, query)
    }

    /// Lazy sequence over every configured source. Nothing is requested
    /// until the first `next()`.
    pub fn subtitles(&self, query: &SubtitleQuery) -> Subtitles<'_, T> {
        Subtitles {
            fetcher: self,
            query: query.clone(),
            pending: self.sources.providers().iter(),
            current: Vec::new().into_iter(),
        }
    }

    /// Deliver each record to `on_loaded` as soon as it is available.
    /// Returns how many records were delivered.
    pub fn for_each_subtitle<F>(&self, query: &SubtitleQuery, mut on_loaded: F) -> usize
    where
        F: FnMut(Subtitle),
    {
        let mut delivered = 0;
        for subtitle in self.subtitles(query) {
            on_loaded(subtitle);
            delivered += 1;
        }
        debug!(external_id = %query.external_id, delivered, "subtitle lookup finished");
        delivered
    }
}

/// Iterator returned by [`SubtitleFetcher::subtitles`]. Finite and not
/// restartable; each source is requested at most once.
pub struct Subtitles<'a, T> {
    fetcher: &'a SubtitleFetcher<T>,
    query: SubtitleQuery,
    pending: std::slice::Iter<'static, ProviderKind>,
    current: std::vec::IntoIter<Subtitle>,
}

impl<T: HttpTransport> Iterator for Subtitles<'_, T> {
    type Item = Subtitle;

    fn next(&mut self) -> Option<Subtitle> {
        loop {
            if let Some(subtitle) = self.current.next() {
                return Some(subtitle);
            }

            let kind = *self.pending.next()?;
            match self.fetcher.fetch_source(kind, &self.query) {
                Ok(subtitles) => self.current = subtitles.into_iter(),
                Err(e) => warn!(
                    provider = %kind,
                    code = e.code(),
                    error = %e,
                    external_id = %self.query.external_id,
                    "subtitle source failed"
                ),
            }
        }
    }
}

impl<T: HttpTransport> FusedIterator for Subtitles<'_, T> {}
