/// Admin API version the client targets unless configured otherwise.
pub const DEFAULT_API_VERSION: &str = "2025-01";

/// Store credentials. Built once at startup and handed to the client.
#[derive(Clone)]
pub struct ApiConfig {
    pub store_url: String,
    pub access_token: String,
    pub api_version: String,
}

impl ApiConfig {
    pub fn new(store_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// `{store}/admin/api/{version}`
    pub fn base_url(&self) -> String {
        format!(
            "{}/admin/api/{}",
            self.store_url.trim_end_matches('/'),
            self.api_version
        )
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url(), endpoint.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("store_url", &self.store_url)
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}
