use crate::error::{Result, XutlError};
use std::collections::HashMap;
use std::process::Command;

/// Runs external programs and captures their standard output
pub trait CommandRunner {
    /// Run `program` with `args` in the current directory.
    ///
    /// # Returns
    /// * `Ok(String)` - Captured stdout if the program exits with code 0
    /// * `Err` - If the program cannot be started or exits non-zero
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Runs commands as real child processes
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| XutlError::command(format!("failed to execute {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(XutlError::command(format!(
                "{} {} failed with exit code {}\nStderr: {}",
                program,
                args.join(" "),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Runner answering from a fixed table; unknown commands fail
#[derive(Default)]
pub struct StaticRunner {
    outputs: HashMap<String, String>,
}

impl StaticRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` (program and args joined by spaces) with `stdout`
    pub fn with_output(mut self, command: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.outputs.insert(command.into(), stdout.into());
        self
    }
}

impl CommandRunner for StaticRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let mut command = program.to_string();
        for arg in args {
            command.push(' ');
            command.push_str(arg);
        }
        self.outputs
            .get(&command)
            .cloned()
            .ok_or_else(|| XutlError::command(format!("{}: command not found", command)))
    }
}

/// Ask the package manager which registry it is configured to use.
///
/// Runs `npm config get registry` and returns the trimmed output.
pub fn npm_registry(runner: &dyn CommandRunner) -> Result<String> {
    let output = runner.run("npm", &["config", "get", "registry"])?;
    let registry = output.trim();
    if registry.is_empty() || registry == "undefined" {
        return Err(XutlError::command("npm reported no registry"));
    }
    Ok(registry.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_registry_trims_output() {
        let runner = StaticRunner::new().with_output(
            "npm config get registry",
            "https://npm.example.com/\n",
        );
        assert_eq!(npm_registry(&runner).unwrap(), "https://npm.example.com/");
    }

    #[test]
    fn test_npm_registry_rejects_empty_output() {
        let runner = StaticRunner::new().with_output("npm config get registry", "\n");
        assert!(matches!(npm_registry(&runner), Err(XutlError::Command(_))));
    }

    #[test]
    fn test_npm_registry_missing_npm() {
        assert!(matches!(
            npm_registry(&StaticRunner::new()),
            Err(XutlError::Command(_))
        ));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let result = SystemCommandRunner.run("xutlversion-no-such-program", &[]);
        assert!(matches!(result, Err(XutlError::Command(_))));
    }
}
