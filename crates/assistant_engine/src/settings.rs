use std::time::Duration;

use url::Url;

use crate::{BackendError, FailureKind};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Always ends with `/` so endpoint joins append rather than replace.
    pub base_url: String,
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

impl BackendSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, BackendError> {
        let mut url = Url::parse(base_url)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(BackendError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            base_url: url.into(),
            ..Self::default()
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}
