use std::fmt;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiBaseUrlError {
    #[error("invalid backend url {raw}: {reason}")]
    Invalid { raw: String, reason: String },
    #[error("backend url must use http or https: {raw}")]
    UnsupportedScheme { raw: String },
}

/// Root URL of the eligibility backend. Always absolute http(s), always
/// ending in `/` so endpoint paths join beneath it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// # Errors
    ///
    /// Returns `ApiBaseUrlError` if the value is not an absolute http(s) URL.
    pub fn parse(raw: &str) -> Result<Self, ApiBaseUrlError> {
        let trimmed = raw.trim();
        let mut url = Url::parse(trimmed).map_err(|err| ApiBaseUrlError::Invalid {
            raw: trimmed.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiBaseUrlError::UnsupportedScheme {
                raw: trimmed.to_string(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self(url))
    }

    /// Build the URL of an endpoint from literal path segments.
    ///
    /// Segments are percent-encoded, so session ids may contain any character.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.0.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl Default for ApiBaseUrl {
    fn default() -> Self {
        Self::parse("http://localhost:8000").expect("default backend url is valid")
    }
}

impl fmt::Debug for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiBaseUrl({})", self.0)
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
