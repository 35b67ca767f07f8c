use std::time::Duration;

use base64::Engine;

use apex_core::{Competitor, ResolvedCompetitor};

use crate::FetchError;

/// Fetches remote competitor images and embeds them as `data:` URLs.
///
/// Resolution is strictly best-effort: a missing URL, transport failure,
/// non-2xx response, or non-image content type all degrade to an absent
/// result. Nothing here ever fails the surrounding report request.
pub struct ImageResolver {
    client: reqwest::Client,
}

impl ImageResolver {
    /// Creates a resolver with a bounded total timeout and explicit `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Resolves one image URL into an embedded `data:<type>;base64,...` string.
    ///
    /// Returns `None` for absent or non-http(s) URLs without touching the
    /// network, and for any fetch failure after logging a warning. The
    /// returned string is always a well-formed data URL — a broken remote
    /// reference never reaches the renderer.
    pub async fn resolve(&self, url: Option<&str>) -> Option<String> {
        let url = url?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            tracing::warn!(url, "skipping image with non-http(s) URL");
            return None;
        }

        match self.fetch_data_url(url).await {
            Ok(data_url) => Some(data_url),
            Err(e) => {
                tracing::warn!(url, error = %e, "image fetch failed; continuing without it");
                None
            }
        }
    }

    /// Resolves logo and creative images for every competitor concurrently.
    ///
    /// All fetches run as one fan-out with no ordering dependency; the
    /// returned list is complete (every fetch settled, success or degraded)
    /// and preserves the input order.
    pub async fn resolve_competitors(&self, competitors: &[Competitor]) -> Vec<ResolvedCompetitor> {
        let tasks = competitors.iter().map(|competitor| async {
            let (logo_data_url, creative_data_url) = futures::future::join(
                self.resolve(competitor.logo_url.as_deref()),
                self.resolve(competitor.creative_url.as_deref()),
            )
            .await;
            ResolvedCompetitor {
                competitor: competitor.clone(),
                logo_data_url,
                creative_data_url,
            }
        });
        futures::future::join_all(tasks).await
    }

    async fn fetch_data_url(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|raw| raw.split(';').next().unwrap_or(raw).trim().to_owned())
            .unwrap_or_default();
        if !content_type.starts_with("image/") {
            return Err(FetchError::NotAnImage {
                content_type,
                url: url.to_owned(),
            });
        }

        let bytes = response.bytes().await?;
        let mut encoded =
            String::with_capacity(base64::encoded_len(bytes.len(), true).unwrap_or(0));
        base64::engine::general_purpose::STANDARD.encode_string(&bytes, &mut encoded);
        Ok(format!("data:{content_type};base64,{encoded}"))
    }
}
