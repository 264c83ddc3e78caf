use anyhow::Context;
use opref_core::EnvironmentVariables;
use opref_secrets::{OnePasswordConfig, SecretManager};
use std::io::Write;
use std::process::ExitCode;

pub fn execute(config: OnePasswordConfig, assignments: &[String]) -> anyhow::Result<ExitCode> {
    let mut env_vars = EnvironmentVariables::new();
    for assignment in assignments {
        env_vars.insert_assignment(assignment)?;
    }

    let resolved = SecretManager::new(config).resolve_secrets(env_vars)?;
    tracing::debug!(variables = resolved.len(), "Resolved environment");

    let mut stdout = std::io::stdout().lock();
    for (key, value) in resolved.iter() {
        writeln!(stdout, "{key}={value}").context("failed to write to stdout")?;
    }

    Ok(ExitCode::SUCCESS)
}
