use anyhow::Context;
use opref_secrets::{OnePassword, OnePasswordConfig};
use std::io::Write;
use std::process::ExitCode;

pub fn execute(config: OnePasswordConfig, references: &[String]) -> anyhow::Result<ExitCode> {
    let mut resolver = OnePassword::new(config);
    let mut stdout = std::io::stdout().lock();

    for reference in references {
        let value = resolver.resolve_reference(reference)?;
        writeln!(stdout, "{value}").context("failed to write to stdout")?;
    }

    Ok(ExitCode::SUCCESS)
}
