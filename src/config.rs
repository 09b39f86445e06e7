//! Runtime configuration, read once from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Sessions not touched for this long are removed.
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);
/// How often the inactivity sweep runs.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);
/// How often the ticker checks running clocks for whole seconds due.
pub const TICK_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Code required by the access gate. `None` leaves the app open.
    pub access_code: Option<String>,
    /// JSON file holding saved roster templates.
    pub roster_file: PathBuf,
    /// Cookie signing key; must be at least 64 bytes or a random key is generated.
    pub session_key: Option<Vec<u8>>,
}

impl Config {
    /// HOST, PORT, ACCESS_CODE, ROSTER_FILE, SESSION_KEY.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let access_code = lookup("ACCESS_CODE")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let roster_file = lookup("ROSTER_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("rosters.json"));
        let session_key = lookup("SESSION_KEY")
            .map(String::into_bytes)
            .filter(|k| k.len() >= 64);
        Self {
            host,
            port,
            access_code,
            roster_file,
            session_key,
        }
    }

    /// True when `code` opens the gate (always true if no code is configured).
    pub fn grants_access(&self, code: &str) -> bool {
        match &self.access_code {
            Some(expected) => expected == code.trim(),
            None => true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert!(cfg.access_code.is_none());
        assert_eq!(cfg.roster_file, PathBuf::from("rosters.json"));
        assert!(cfg.grants_access("anything"));
    }

    #[test]
    fn access_code_and_bad_port() {
        let cfg = config_from(&[("PORT", "not-a-port"), ("ACCESS_CODE", " 1234 "), ("SESSION_KEY", "short")]);
        assert_eq!(cfg.port, 8080);
        assert!(cfg.grants_access("1234"));
        assert!(!cfg.grants_access("4321"));
        assert!(cfg.session_key.is_none());
    }
}
