use clap::Parser;
use opref_core::{OP_ACCOUNT_VAR, OP_BINARY, OP_SERVICE_ACCOUNT_TOKEN_VAR};
use opref_secrets::OnePasswordConfig;
use opref_utils::RetryConfig;
use std::process::ExitCode;

mod commands;

use commands::Commands;

#[derive(Parser)]
#[command(name = "opref")]
#[command(about = "Resolve 1Password op:// references through the op CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Name or path of the 1Password CLI binary
    #[arg(long, global = true, default_value = OP_BINARY)]
    binary: String,

    /// 1Password account to use when fetching items
    #[arg(long, global = true, env = OP_ACCOUNT_VAR)]
    account: Option<String>,

    /// Service account token handed to the CLI
    #[arg(long, global = true, env = OP_SERVICE_ACCOUNT_TOKEN_VAR, hide_env_values = true)]
    token: Option<String>,

    /// Attempts per CLI call when 1Password reports a transient failure
    #[arg(long, global = true, default_value_t = RetryConfig::default().max_attempts)]
    attempts: usize,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> OnePasswordConfig {
        let retry = RetryConfig {
            max_attempts: self.attempts,
            ..RetryConfig::default()
        };
        let mut config = OnePasswordConfig::default()
            .with_binary(&self.binary)
            .with_retry(retry);
        if let Some(token) = &self.token {
            config = config.with_service_account_token(token);
        }
        if let Some(account) = &self.account {
            config = config.with_account(account);
        }
        config
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = opref_utils::tracing::init("warn") {
        eprintln!("failed to initialize logging: {e}");
    }

    let config = cli.config();
    cli.command.execute(config)
}
