//! Staleness evaluation
//!
//! Decides whether a target's action must run. Verdicts are remembered for the
//! length of one invocation so staleness propagates from prerequisites to
//! everything downstream of them, no matter how many levels apart.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use tracing::debug;

use crate::registry::{Node, Registry, Target};
use crate::types::MendResult;

/// Why a target is, or is not, stale
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    Phony,
    Forced,
    /// The target's own artifact does not exist
    Missing,
    PrerequisiteStale(String),
    /// A file-backed prerequisite has no file on disk
    PrerequisiteMissing(String),
    /// A prerequisite's artifact is strictly newer than the target's
    Newer(String),
    Fresh,
}

impl Staleness {
    pub fn is_stale(&self) -> bool {
        !matches!(self, Staleness::Fresh)
    }
}

impl fmt::Display for Staleness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Staleness::Phony => write!(f, "phony"),
            Staleness::Forced => write!(f, "forced"),
            Staleness::Missing => write!(f, "output missing"),
            Staleness::PrerequisiteStale(id) => write!(f, "'{}' is out of date", id),
            Staleness::PrerequisiteMissing(id) => write!(f, "'{}' has no file", id),
            Staleness::Newer(id) => write!(f, "'{}' is newer", id),
            Staleness::Fresh => write!(f, "up to date"),
        }
    }
}

/// Last modification time of `path`, `None` when it does not exist.
/// Symlinks are followed.
pub fn modified_time(path: &Path) -> io::Result<Option<SystemTime>> {
    match std::fs::metadata(path) {
        Ok(metadata) => metadata.modified().map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Per-invocation staleness state
pub struct StalenessEvaluator<'a> {
    registry: &'a Registry,
    always_run: bool,
    verdicts: HashMap<String, bool>,
}

impl<'a> StalenessEvaluator<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            always_run: false,
            verdicts: HashMap::new(),
        }
    }

    /// Treat every target as stale
    pub fn always_run(mut self, always_run: bool) -> Self {
        self.always_run = always_run;
        self
    }

    /// Plain files are always satisfied
    pub fn record_leaf(&mut self, identifier: &str) {
        self.verdicts.insert(identifier.to_string(), false);
    }

    /// Decide whether `target` is stale and remember the verdict for its
    /// dependents. Prerequisites must have been evaluated (or recorded as
    /// leaves) first, which plan order guarantees.
    pub fn evaluate(&mut self, target: &Target) -> MendResult<Staleness> {
        let staleness = self.judge(target)?;
        debug!(id = %target.identifier, verdict = %staleness, "evaluated staleness");
        self.verdicts
            .insert(target.identifier.clone(), staleness.is_stale());
        Ok(staleness)
    }

    pub fn was_stale(&self, identifier: &str) -> Option<bool> {
        self.verdicts.get(identifier).copied()
    }

    fn judge(&self, target: &Target) -> MendResult<Staleness> {
        if target.phony {
            return Ok(Staleness::Phony);
        }
        if self.always_run {
            return Ok(Staleness::Forced);
        }
        let Some(artifact) = target.artifact() else {
            return Ok(Staleness::Phony);
        };
        let Some(own_time) = modified_time(&self.registry.resolve_path(artifact))? else {
            return Ok(Staleness::Missing);
        };

        for prerequisite in &target.prerequisites {
            if self.verdicts.get(prerequisite).copied().unwrap_or(false) {
                return Ok(Staleness::PrerequisiteStale(prerequisite.clone()));
            }

            let path = match self.registry.lookup(prerequisite)? {
                Node::File(file) => self.registry.resolve_path(Path::new(file)),
                Node::Target(dependency) => match dependency.artifact() {
                    Some(path) => self.registry.resolve_path(path),
                    None => continue,
                },
            };
            match modified_time(&path)? {
                None => return Ok(Staleness::PrerequisiteMissing(prerequisite.clone())),
                Some(time) if time > own_time => {
                    return Ok(Staleness::Newer(prerequisite.clone()))
                }
                Some(_) => {}
            }
        }

        Ok(Staleness::Fresh)
    }
}
