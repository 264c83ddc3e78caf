use opref_secrets::onepassword::{CommandExecutor, SystemCommandExecutor};
use opref_secrets::OnePasswordConfig;
use std::process::ExitCode;

pub fn execute(config: &OnePasswordConfig) -> ExitCode {
    if SystemCommandExecutor::new(config).is_installed() {
        println!("{} is installed", config.binary);
        ExitCode::SUCCESS
    } else {
        println!("{} was not found on PATH", config.binary);
        ExitCode::FAILURE
    }
}
