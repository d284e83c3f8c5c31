use tracing::debug;

use crate::transport::HttpTransport;
use crate::{FetchError, ProviderKind, Subtitle, SubtitleQuery};

/// A subtitle-index service that can be queried by external id.
pub trait SubtitleProvider {
    fn kind(&self) -> ProviderKind;

    /// Build the lookup URL for a query. The id is passed through verbatim.
    fn build_url(&self, query: &SubtitleQuery) -> String;

    /// Decode a response body into normalized records, in payload order.
    fn parse(&self, body: &str) -> Result<Vec<Subtitle>, FetchError>;

    /// Run one lookup against this provider.
    fn fetch(
        &self,
        transport: &dyn HttpTransport,
        query: &SubtitleQuery,
    ) -> Result<Vec<Subtitle>, FetchError> {
        let url = self.build_url(query);
        let resp = transport.get(&url)?;

        if !resp.is_success() {
            return Err(FetchError::Status(resp.status));
        }

        let body = match resp.body {
            Some(body) if !body.trim().is_empty() => body,
            _ => return Err(FetchError::EmptyBody),
        };

        let subtitles = self.parse(&body)?;
        debug!(provider = %self.kind(), count = subtitles.len(), "decoded subtitles");
        Ok(subtitles)
    }
}
