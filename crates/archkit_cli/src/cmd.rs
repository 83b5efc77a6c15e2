use archkit_server::{ServerConfig, DEFAULT_BIND, DEFAULT_DB_PATH};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "archkit")]
#[command(about = "Task, order and product service over HTTP + SQLite.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Check that the core library is linked
    Ping,
    /// Print the core library version
    Version,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Socket address to listen on
    #[arg(long, env = "ARCHKIT_BIND", default_value_t = DEFAULT_BIND)]
    pub bind: SocketAddr,
    /// SQLite database file, created when missing
    #[arg(long, env = "ARCHKIT_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
    /// trace|debug|info|warn|error; debug builds default to debug
    #[arg(long, env = "ARCHKIT_LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Rolling log directory [default: <tmp>/archkit-logs]
    #[arg(long, env = "ARCHKIT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl ServeArgs {
    pub fn into_config(self, cwd: &Path) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            bind: self.bind,
            db_path: self.db,
            log_level: self.log_level.unwrap_or(defaults.log_level),
            log_dir: self.log_dir.unwrap_or(defaults.log_dir),
        }
        .resolve_log_dir(cwd)
    }
}
