use serde::{Deserialize, Serialize};

/// Connection settings for a Media Services endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// REST root, e.g. `https://media.windows.net/API/`
    pub endpoint: String,
    /// Bearer token attached to every request (acquired out of band)
    pub access_token: Option<String>,
    /// Value of the `x-ms-version` header
    pub api_version: String,
    pub connect_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://media.windows.net/API/".to_string(),
            access_token: None,
            api_version: "2.19".to_string(),
            connect_timeout_seconds: 10,
            request_timeout_seconds: 30,
        }
    }
}

impl ClientConfig {
    /// Collect every configuration problem instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.endpoint.trim().is_empty() {
            errors.push("service.endpoint must not be empty".to_string());
        } else {
            match url::Url::parse(&self.endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(format!(
                    "service.endpoint must use http or https, got '{}'",
                    url.scheme()
                )),
                Err(e) => errors.push(format!("service.endpoint is not a valid URL: {e}")),
            }
        }

        if self.api_version.trim().is_empty() {
            errors.push("service.api_version must not be empty".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            errors.push("service.connect_timeout_seconds must be greater than 0".to_string());
        }
        if self.request_timeout_seconds == 0 {
            errors.push("service.request_timeout_seconds must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
