//! Command execution utilities
//!
//! This module provides a unified interface for executing the different kinds of
//! actions (shell commands, scripts, executables with args, in-process callables)
//! with consistent error handling and logging.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::registry::Action;
use crate::types::ActionError;

/// Runs a single target's action from the registry root
pub struct CommandExecutor<'a> {
    root: &'a Path,
    target: &'a str,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(root: &'a Path, target: &'a str) -> Self {
        Self { root, target }
    }

    /// Run `action` to completion; only its success or failure matters
    pub fn execute(&self, action: &Action) -> Result<(), ActionError> {
        match action {
            Action::None => Ok(()),
            Action::Shell(cmd) => self.execute_shell_command(cmd),
            Action::Exec { program, args } => self.execute_command_with_args(program, args),
            Action::Script(path) => self.execute_script(path),
            Action::Callable(f) => f().map_err(ActionError::Callable),
        }
    }

    /// Execute a command with common setup and error handling
    fn execute_command(&self, command: &mut Command, program: &str) -> Result<(), ActionError> {
        command.current_dir(self.root);
        command.env("MEND_TARGET", self.target);

        info!(id = self.target, program, "running action");
        let status = command.status().map_err(|source| ActionError::Spawn {
            program: program.to_string(),
            source,
        })?;

        if !status.success() {
            return Err(ActionError::ExitStatus {
                program: program.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Execute a script file
    fn execute_script(&self, script_path: &Path) -> Result<(), ActionError> {
        let full_script_path = self.script_location(script_path)?;

        if !full_script_path.exists() {
            return Err(ActionError::ScriptNotFound(
                full_script_path.display().to_string(),
            ));
        }

        let mut command = Command::new(&full_script_path);
        self.execute_command(&mut command, &full_script_path.display().to_string())
    }

    /// Absolute path of a script; relative paths resolve against the registry root.
    /// The child's working directory is the root, so the path must not stay relative.
    fn script_location(&self, script_path: &Path) -> Result<PathBuf, ActionError> {
        let full_script_path = if script_path.is_relative() {
            self.root.join(script_path)
        } else {
            script_path.to_path_buf()
        };
        std::path::absolute(&full_script_path).map_err(|source| ActionError::Spawn {
            program: full_script_path.display().to_string(),
            source,
        })
    }

    /// Execute a command with arguments
    fn execute_command_with_args(&self, program: &str, args: &[String]) -> Result<(), ActionError> {
        let mut command = Command::new(program);
        command.args(args);
        self.execute_command(&mut command, program)
    }

    /// Execute a single shell command
    fn execute_shell_command(&self, cmd: &str) -> Result<(), ActionError> {
        let mut command = Command::new("sh");
        command.arg("-c").arg(cmd);
        self.execute_command(&mut command, cmd)
    }
}
