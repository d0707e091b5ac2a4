//! Backend address handling: accepts `host`, `host:port` or a full
//! `ws://`/`wss://` URL and produces the URL to dial.

use thiserror::Error;
use url::Url;

/// Port the backend's WebSocket server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 8002;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid address '{0}': {1}")]
    Parse(String, url::ParseError),
    #[error("unsupported scheme '{0}' (expected ws or wss)")]
    Scheme(String),
    #[error("address '{0}' has no host")]
    NoHost(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: Url,
    pub host: String,
    pub port: u16,
}

impl Target {
    pub fn parse(input: &str, default_port: u16) -> Result<Self, TargetError> {
        let input = input.trim();
        let raw = if input.contains("://") {
            input.to_string()
        } else {
            format!("ws://{input}")
        };
        let mut url = Url::parse(&raw).map_err(|e| TargetError::Parse(input.to_string(), e))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(TargetError::Scheme(url.scheme().to_string()));
        }
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| TargetError::NoHost(input.to_string()))?
            .to_string();
        if url.port().is_none() && !input.contains("://") {
            // bare host: the scheme default (80) is never what the backend uses
            let _ = url.set_port(Some(default_port));
        }
        let port = url.port_or_known_default().unwrap_or(default_port);
        Ok(Self { url, host, port })
    }

    /// "host:port", as shown in connection notices.
    pub fn label(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}
