use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080));
pub const DEFAULT_DB_PATH: &str = "./archkit.sqlite3";
pub const DEFAULT_LOG_DIR_NAME: &str = "archkit-logs";

/// Resolved runtime settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Always absolute after [`ServerConfig::resolve_log_dir`].
    pub log_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: archkit_core::default_log_level().to_string(),
            log_dir: std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl ServerConfig {
    /// Anchors a relative `log_dir` at `cwd`; the logger only accepts absolute paths.
    pub fn resolve_log_dir(mut self, cwd: &Path) -> Self {
        if self.log_dir.is_relative() {
            self.log_dir = cwd.join(&self.log_dir);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_localhost_and_temp_logs() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_path, PathBuf::from("./archkit.sqlite3"));
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with(DEFAULT_LOG_DIR_NAME));
    }

    #[test]
    fn relative_log_dir_is_anchored() {
        let cwd = std::env::temp_dir();
        let config = ServerConfig {
            log_dir: PathBuf::from("logs"),
            ..ServerConfig::default()
        }
        .resolve_log_dir(&cwd);
        assert_eq!(config.log_dir, cwd.join("logs"));
    }

    #[test]
    fn absolute_log_dir_is_kept() {
        let absolute = std::env::temp_dir().join("custom");
        let config = ServerConfig {
            log_dir: absolute.clone(),
            ..ServerConfig::default()
        }
        .resolve_log_dir(Path::new("/ignored"));
        assert_eq!(config.log_dir, absolute);
    }
}
