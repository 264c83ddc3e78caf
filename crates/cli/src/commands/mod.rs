use clap::Subcommand;
use opref_secrets::OnePasswordConfig;
use std::process::ExitCode;

pub mod check;
pub mod env;
pub mod read;

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve references and print each value on its own line
    Read {
        /// References such as op://vault/item/field or op://vault/item/section/field
        #[arg(required = true, value_name = "REFERENCE")]
        references: Vec<String>,
    },

    /// Resolve KEY=VALUE assignments, passing non-reference values through
    Env {
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },

    /// Check whether the 1Password CLI can be found
    Check,
}

impl Commands {
    pub fn execute(self, config: OnePasswordConfig) -> anyhow::Result<ExitCode> {
        match self {
            Commands::Read { references } => read::execute(config, &references),
            Commands::Env { assignments } => env::execute(config, &assignments),
            Commands::Check => Ok(check::execute(&config)),
        }
    }
}
