use thiserror::Error;

/// The main error type for mend operations
#[derive(Debug, Error)]
pub enum MendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Target '{0}' is declared more than once")]
    DuplicateTarget(String),

    #[error("No rule to make target '{0}'")]
    UnknownTarget(String),

    #[error("Circular dependency detected: {}", describe_cycle(.0))]
    CyclicDependency(Vec<String>),

    #[error("Target '{target}' failed: {source}")]
    ActionFailed {
        target: String,
        #[source]
        source: ActionError,
    },

    /// Carries the next target that was not launched, if any remained
    #[error("Interrupted{}", describe_pending(.0))]
    Interrupted(Option<String>),
}

/// Why a target's action did not complete successfully
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {}", describe_exit(.code))]
    ExitStatus { program: String, code: Option<i32> },

    #[error("script file '{0}' not found")]
    ScriptNotFound(String),

    #[error("{0}")]
    Callable(String),
}

impl MendError {
    /// Process exit code for this failure; each error kind gets its own
    /// code so scripts can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            MendError::Io(_) | MendError::Yaml(_) | MendError::Config(_) => 1,
            MendError::UnknownTarget(_) => 2,
            MendError::CyclicDependency(_) => 3,
            MendError::ActionFailed { .. } => 4,
            MendError::DuplicateTarget(_) => 5,
            MendError::Interrupted(_) => 130,
        }
    }
}

/// Render a cycle as `a -> b -> a`
pub fn describe_cycle(cycle: &[String]) -> String {
    let mut path = cycle.to_vec();
    if let Some(first) = path.first().cloned() {
        path.push(first);
    }
    path.join(" -> ")
}

fn describe_pending(pending: &Option<String>) -> String {
    match pending {
        Some(target) => format!(" before running target '{}'", target),
        None => " after the last target finished".to_string(),
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Result type alias for mend operations
pub type MendResult<T> = Result<T, MendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_closes_the_loop() {
        let err = MendError::CyclicDependency(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(err.to_string(), "Circular dependency detected: x -> y -> x");
    }

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let codes = [
            MendError::UnknownTarget("z".into()).exit_code(),
            MendError::CyclicDependency(vec!["x".into()]).exit_code(),
            MendError::ActionFailed {
                target: "b".into(),
                source: ActionError::Callable("boom".into()),
            }
            .exit_code(),
            MendError::DuplicateTarget("a".into()).exit_code(),
        ];
        let mut unique = codes.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
        assert!(codes.iter().all(|code| *code != 0));
    }

    #[test]
    fn action_failure_reports_target_and_cause() {
        let err = MendError::ActionFailed {
            target: "lint".into(),
            source: ActionError::ExitStatus {
                program: "ruff".into(),
                code: Some(1),
            },
        };
        assert_eq!(
            err.to_string(),
            "Target 'lint' failed: 'ruff' exited with exit code 1"
        );
    }

    #[test]
    fn interrupt_message_names_the_pending_target() {
        let pending = MendError::Interrupted(Some("test".into()));
        assert_eq!(pending.to_string(), "Interrupted before running target 'test'");
        let finished = MendError::Interrupted(None);
        assert_eq!(finished.to_string(), "Interrupted after the last target finished");
        assert_eq!(finished.exit_code(), 130);
    }
}
