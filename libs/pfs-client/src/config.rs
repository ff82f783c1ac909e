use serde::{Deserialize, Serialize};

/// Connection settings for one platform tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Platform host, e.g. `example.platformforscience.com`.
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub username: String,
    /// Never written back out when the config is serialized.
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Overrides the `https://{host}/{tenant}/odata/` endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout; 0 disables it.
    #[serde(default)]
    pub timeout_sec: u64,
    /// Sent as `Prefer: odata.maxpagesize=N` when set.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl SessionConfig {
    pub fn new(
        host: impl Into<String>,
        tenant: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            tenant: tenant.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// OData service root, always ending in `/`.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) if url.ends_with('/') => url.clone(),
            Some(url) => format!("{url}/"),
            None => format!("https://{}/{}/odata/", self.host, self.tenant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_from_host_and_tenant() {
        let cfg = SessionConfig::new("lims.example.com", "DEV_KOMP", "u", "p");
        assert_eq!(cfg.base_url(), "https://lims.example.com/DEV_KOMP/odata/");
    }

    #[test]
    fn base_url_override_gets_trailing_slash() {
        let cfg = SessionConfig {
            base_url: Some("http://127.0.0.1:9000/T/odata".into()),
            ..SessionConfig::default()
        };
        assert_eq!(cfg.base_url(), "http://127.0.0.1:9000/T/odata/");
    }

    #[test]
    fn password_is_not_serialized() {
        let cfg = SessionConfig::new("h", "t", "user", "secret");
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("user"));
        assert!(!json.contains("secret"));
    }
}
