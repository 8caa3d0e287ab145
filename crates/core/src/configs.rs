//! Declaration file parsing
//!
//! Target declarations are supplied as YAML; this module turns them into a
//! [`crate::registry::Registry`].

pub mod targets;

pub use targets::{parse_targets_config, TargetConfig, TargetsFileConfig};
