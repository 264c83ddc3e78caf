//! Invocation of the `op` CLI.

use super::config::OnePasswordConfig;
use opref_core::{Error, Result, RETRYABLE_STDERR_MARKER};
use opref_utils::{retry, RetryConfig};
use std::io::Write;
use std::process::Command;

/// Capability to run the 1Password CLI
///
/// This abstraction lets the resolver be exercised against a recording double
/// instead of a real `op` binary.
pub trait CommandExecutor: Send + Sync {
    /// Whether the CLI binary can be found
    fn is_installed(&self) -> bool;

    /// Run the CLI with `args` and return its stdout
    fn execute(&self, args: &[String]) -> Result<Vec<u8>>;
}

/// Production implementation that runs the real binary
pub struct SystemCommandExecutor {
    binary: String,
    token_env: String,
    service_account_token: Option<String>,
    retry_config: RetryConfig,
}

impl SystemCommandExecutor {
    #[must_use]
    pub fn new(config: &OnePasswordConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            token_env: config.token_env.clone(),
            service_account_token: config.service_account_token.clone(),
            retry_config: config.retry.clone(),
        }
    }

    /// Run the binary once and classify a failure
    ///
    /// stderr is always echoed to our own stderr. A failure whose stderr
    /// mentions a URL is what `op` prints for backend hiccups, so it is
    /// marked retryable; every other failure is final.
    fn execute_once(&self, args: &[String]) -> Result<Vec<u8>> {
        let mut command = Command::new(&self.binary);
        command.args(args);
        if let Some(token) = &self.service_account_token {
            command.env(&self.token_env, token);
        }

        let output = command
            .output()
            .map_err(|e| Error::command_spawn(&self.binary, e))?;
        let _ = std::io::stderr().write_all(&output.stderr);

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let retryable = stderr.contains(RETRYABLE_STDERR_MARKER);
        if retryable {
            tracing::warn!(
                command = %self.binary,
                "1Password CLI reported a backend failure, asking again"
            );
        }

        Err(Error::command_execution(
            &self.binary,
            args.to_vec(),
            stderr,
            output.status.code(),
            retryable,
        ))
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn is_installed(&self) -> bool {
        which::which(&self.binary).is_ok()
    }

    fn execute(&self, args: &[String]) -> Result<Vec<u8>> {
        retry(&self.retry_config, || self.execute_once(args))
    }
}

/// Test double that serves staged responses and records every call
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    installed: bool,
    responses: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, TestResponse>>>,
    calls: std::sync::Arc<std::sync::Mutex<Vec<Vec<String>>>>,
}

#[cfg(test)]
#[derive(Clone)]
pub enum TestResponse {
    Output(Vec<u8>),
    Failure { stderr: String, retryable: bool },
}

#[cfg(test)]
impl RecordingExecutor {
    pub fn new() -> Self {
        Self {
            installed: true,
            ..Default::default()
        }
    }

    pub fn not_installed() -> Self {
        Self::default()
    }

    pub fn add_response(&self, args: &[&str], response: TestResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert(args.join(" "), response);
    }

    pub fn add_output(&self, args: &[&str], stdout: impl Into<Vec<u8>>) {
        self.add_response(args, TestResponse::Output(stdout.into()));
    }

    pub fn add_failure(&self, args: &[&str], stderr: &str) {
        self.add_response(
            args,
            TestResponse::Failure {
                stderr: stderr.to_string(),
                retryable: false,
            },
        );
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose arguments start with `prefix`
    pub fn count_calls(&self, prefix: &[&str]) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                call.len() >= prefix.len() && call.iter().zip(prefix).all(|(a, b)| a == b)
            })
            .count()
    }
}

#[cfg(test)]
impl CommandExecutor for RecordingExecutor {
    fn is_installed(&self) -> bool {
        self.installed
    }

    fn execute(&self, args: &[String]) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(args.to_vec());
        let key = args.join(" ");
        match self.responses.lock().unwrap().get(&key).cloned() {
            Some(TestResponse::Output(stdout)) => Ok(stdout),
            Some(TestResponse::Failure { stderr, retryable }) => Err(Error::command_execution(
                "op",
                args.to_vec(),
                stderr,
                Some(1),
                retryable,
            )),
            None => Err(Error::configuration(format!(
                "no test response configured for command: {key}"
            ))),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Write an executable shell script standing in for `op`
    fn fake_op(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("op");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn executor_for(binary: &Path, attempts: usize) -> SystemCommandExecutor {
        let config = OnePasswordConfig::default()
            .with_binary(binary.to_string_lossy())
            .with_retry(RetryConfig::immediate(attempts));
        SystemCommandExecutor::new(&config)
    }

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| (*a).to_string()).collect()
    }

    #[test]
    #[serial]
    fn test_returns_stdout_and_passes_args() {
        let dir = TempDir::new().unwrap();
        let op = fake_op(dir.path(), r#"printf '%s|' "$@""#);

        let output = executor_for(&op, 5)
            .execute(&args(&["item", "get", "--format", "json", "My Item"]))
            .unwrap();
        assert_eq!(output, b"item|get|--format|json|My Item|");
    }

    #[test]
    #[serial]
    fn test_non_retryable_failure_runs_once() {
        let dir = TempDir::new().unwrap();
        let counter = dir.path().join("count");
        let op = fake_op(
            dir.path(),
            &format!(
                "echo run >> '{}'\necho '[ERROR] not signed in' >&2\nexit 1",
                counter.display()
            ),
        );

        let err = executor_for(&op, 5).execute(&args(&["whoami"])).unwrap_err();
        assert_eq!(err.to_string(), "[ERROR] not signed in\n");
        assert!(!err.is_retryable());
        assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), 1);
    }

    #[test]
    #[serial]
    fn test_retryable_failure_uses_every_attempt() {
        let dir = TempDir::new().unwrap();
        let counter = dir.path().join("count");
        let op = fake_op(
            dir.path(),
            &format!(
                "echo run >> '{}'\necho 'unexpected error, see https://1password.community' >&2\nexit 1",
                counter.display()
            ),
        );

        let err = executor_for(&op, 3).execute(&args(&["whoami"])).unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("https://1password.community"));
        assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), 3);
    }

    #[test]
    #[serial]
    fn test_retryable_failure_recovers() {
        let dir = TempDir::new().unwrap();
        let counter = dir.path().join("count");
        let op = fake_op(
            dir.path(),
            &format!(
                "echo run >> '{c}'\n\
                 if [ \"$(wc -l < '{c}')\" -lt 2 ]; then echo 'see https://status' >&2; exit 1; fi\n\
                 printf recovered",
                c = counter.display()
            ),
        );

        let output = executor_for(&op, 5).execute(&args(&["whoami"])).unwrap();
        assert_eq!(output, b"recovered");
        assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), 2);
    }

    #[test]
    #[serial]
    fn test_token_passed_through_environment() {
        let dir = TempDir::new().unwrap();
        let op = fake_op(dir.path(), r#"printf '%s' "$OP_SERVICE_ACCOUNT_TOKEN""#);

        let config = OnePasswordConfig::default()
            .with_binary(op.to_string_lossy())
            .with_service_account_token("ops_token_value");
        let output = SystemCommandExecutor::new(&config)
            .execute(&args(&["read", "op://v/i/f"]))
            .unwrap();
        assert_eq!(output, b"ops_token_value");
    }

    #[test]
    #[serial]
    fn test_custom_token_env() {
        let dir = TempDir::new().unwrap();
        let op = fake_op(dir.path(), r#"printf '%s' "$CUSTOM_OP_TOKEN""#);

        let config = OnePasswordConfig::default()
            .with_binary(op.to_string_lossy())
            .with_token_env("CUSTOM_OP_TOKEN")
            .with_service_account_token("abc");
        let output = SystemCommandExecutor::new(&config).execute(&[]).unwrap();
        assert_eq!(output, b"abc");
    }

    #[test]
    #[serial]
    fn test_is_installed() {
        let dir = TempDir::new().unwrap();
        let op = fake_op(dir.path(), "exit 0");
        assert!(executor_for(&op, 1).is_installed());

        let missing = dir.path().join("not-op");
        assert!(!executor_for(&missing, 1).is_installed());
    }

    #[test]
    fn test_spawn_failure_is_not_retried() {
        let config = OnePasswordConfig::default()
            .with_binary("/nonexistent/opref-test/op")
            .with_retry(RetryConfig::default());
        let err = SystemCommandExecutor::new(&config)
            .execute(&args(&["whoami"]))
            .unwrap_err();
        assert!(matches!(err, Error::CommandSpawn { .. }));
    }
}
