//! Proxy configuration, read once at startup.

use crate::ProxyError;
use reqwest::Url;
use std::path::PathBuf;

pub const PROXY_ADDR_VAR: &str = "TASKBOARD_PROXY_ADDR";
pub const PROXY_TARGET_VAR: &str = "TASKBOARD_PROXY_TARGET";
pub const FRONTEND_DIR_VAR: &str = "TASKBOARD_FRONTEND_DIR";

pub const DEFAULT_PROXY_ADDR: &str = "0.0.0.0:3000";
/// Backend service name and port inside the compose network.
pub const DEFAULT_PROXY_TARGET: &str = "http://backend:3500";

#[derive(Clone, Debug)]
pub struct ProxyConfig {
    listen_addr: String,
    target: Url,
    frontend_dir: Option<PathBuf>,
}

impl ProxyConfig {
    /// # Errors
    /// Returns [`ProxyError::InvalidTarget`] unless `target` is an absolute `http`/`https` URL
    /// with a host.
    pub fn new(
        listen_addr: impl Into<String>,
        target: &str,
        frontend_dir: Option<PathBuf>,
    ) -> Result<Self, ProxyError> {
        let invalid = |reason: String| ProxyError::InvalidTarget(target.to_owned(), reason);

        let url = Url::parse(target).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".into()));
        }

        Ok(Self {
            listen_addr: listen_addr.into(),
            target: url,
            frontend_dir,
        })
    }

    /// Read the configuration from the process environment, falling back to `default_target`
    /// when no target is set.
    pub fn from_env(default_target: &str) -> Result<Self, ProxyError> {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self::new(
            var(PROXY_ADDR_VAR).unwrap_or_else(|| DEFAULT_PROXY_ADDR.into()),
            &var(PROXY_TARGET_VAR).unwrap_or_else(|| default_target.into()),
            var(FRONTEND_DIR_VAR).map(PathBuf::from),
        )
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    pub fn frontend_dir(&self) -> Option<&PathBuf> {
        self.frontend_dir.as_ref()
    }

    /// `scheme://host[:port]` of the target, used as the rewritten `Origin`.
    pub fn target_origin(&self) -> String {
        self.target.origin().ascii_serialization()
    }

    /// `host[:port]` of the target, used as the rewritten `Host`.
    pub fn target_authority(&self) -> String {
        let host = self.target.host_str().unwrap_or_default();
        match self.target.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_origin_and_authority() {
        let cfg = ProxyConfig::new("127.0.0.1:0", "http://backend:3500/", None).unwrap();
        assert_eq!(cfg.target_origin(), "http://backend:3500");
        assert_eq!(cfg.target_authority(), "backend:3500");

        let cfg = ProxyConfig::new("127.0.0.1:0", "https://api.example.com", None).unwrap();
        assert_eq!(cfg.target_origin(), "https://api.example.com");
        assert_eq!(cfg.target_authority(), "api.example.com");
    }

    #[test]
    fn test_rejects_bad_targets() {
        assert!(ProxyConfig::new("a", "backend:3500", None).is_err());
        assert!(ProxyConfig::new("a", "ftp://backend", None).is_err());
        assert!(ProxyConfig::new("a", "not a url", None).is_err());
    }
}
