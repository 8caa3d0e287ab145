use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::registry::{Action, Registry, Target};
use crate::types::{MendError, MendResult};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Command {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetConfig {
    pub name: String,
    pub description: Option<String>,
    /// Phony targets never correspond to a file and always run
    #[serde(default)]
    pub phony: bool,
    /// File the target produces, if it differs from the name
    pub output: Option<String>,
    pub dependencies: Option<Vec<String>>,
    pub command: Option<Command>,
    pub script: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetsFileConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Target to run when none is requested; defaults to the first declared one
    pub default: Option<String>,
    pub targets: Vec<TargetConfig>,
}

pub fn parse_targets_config(yaml_str: &str) -> MendResult<TargetsFileConfig> {
    let config: TargetsFileConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

impl TargetConfig {
    fn action(&self) -> MendResult<Action> {
        match (&self.command, &self.script) {
            (Some(_), Some(_)) => Err(MendError::Config(format!(
                "Target '{}' has both a command and a script",
                self.name
            ))),
            (Some(Command::Single(cmd)), None) => Ok(Action::Shell(cmd.clone())),
            (Some(Command::Multiple(cmds)), None) => match cmds.split_first() {
                Some((program, args)) => Ok(Action::Exec {
                    program: program.clone(),
                    args: args.to_vec(),
                }),
                None => Ok(Action::None),
            },
            (None, Some(script)) => Ok(Action::Script(PathBuf::from(script))),
            (None, None) => Ok(Action::None),
        }
    }

    pub fn into_target(self) -> MendResult<Target> {
        let action = self.action()?;
        Ok(Target {
            identifier: self.name,
            description: self.description,
            prerequisites: self.dependencies.unwrap_or_default(),
            action,
            phony: self.phony,
            output: self.output.map(PathBuf::from),
        })
    }
}

impl TargetsFileConfig {
    /// Build a registry rooted at `root`; duplicate names abort the whole load
    pub fn into_registry(self, root: &Path) -> MendResult<Registry> {
        let mut registry = Registry::new(root);
        for target in self.targets {
            registry.register(target.into_target()?)?;
        }

        if let Some(default) = self.default {
            if registry.get(&default).is_none() {
                return Err(MendError::Config(format!(
                    "Default target '{}' is not declared",
                    default
                )));
            }
            registry.set_default_target(default);
        }
        Ok(registry)
    }
}
