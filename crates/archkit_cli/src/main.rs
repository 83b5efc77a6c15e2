//! archkit command-line entry point.
//!
//! # Responsibility
//! - Resolve server settings from flags and `ARCHKIT_*` variables.
//! - Initialize logging before any request is served.

mod cmd;

use anyhow::Context;
use cmd::Commands;
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = cmd::CommandLine::parse_args();
    match commands.command {
        Commands::Serve(args) => {
            let cwd = std::env::current_dir().context("cannot resolve current directory")?;
            let config = args.into_config(&cwd);
            let log_dir = config.log_dir.to_string_lossy().into_owned();
            archkit_core::init_logging(&config.log_level, &log_dir)
                .context("failed to initialize logging")?;
            info!(
                "event=cli_serve module=cli status=start version={}",
                archkit_core::core_version()
            );
            archkit_server::serve(config).await?;
            Ok(())
        }
        Commands::Ping => {
            println!("archkit ping={}", archkit_core::ping());
            Ok(())
        }
        Commands::Version => {
            println!("archkit version={}", archkit_core::core_version());
            Ok(())
        }
    }
}
