use std::time::Duration;

/// Header that makes the tunnel in front of the service skip its browser warning page.
pub const TUNNEL_SKIP_HEADER: (&str, &str) = ("ngrok-skip-browser-warning", "true");

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for one generation call. The service runs several model
    /// calls per request, so this is generous.
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
    pub max_response_bytes: u64,
    pub extra_headers: Vec<(String, String)>,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
            probe_timeout: Duration::from_secs(10),
            max_response_bytes: 8 * 1024 * 1024,
            extra_headers: vec![(
                TUNNEL_SKIP_HEADER.0.to_string(),
                TUNNEL_SKIP_HEADER.1.to_string(),
            )],
        }
    }
}
