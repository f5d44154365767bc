//! Context configuration.
//!
//! [`ContextSettings`] is plain data and deserializes from any `serde`
//! format; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::stereotype::DEFAULT_COMPONENT_MARKERS;

/// What happens when two different types derive the same bean name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Abort initialization with [`ContextError::NameCollision`](crate::ContextError::NameCollision).
    #[default]
    Reject,

    /// Build the newcomer and replace the registered bean (last write wins).
    ///
    /// Beans that already received the replaced instance keep it, and a type
    /// built earlier in the pass is never rebuilt.
    Overwrite,
}

impl std::fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollisionPolicy::Reject => write!(f, "reject"),
            CollisionPolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Settings of an [`ApplicationContext`](crate::context::ApplicationContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextSettings {
    /// Meta-tag names that make a tag component-defining.
    pub component_markers: Vec<String>,
    /// Policy for bean name collisions.
    pub collision_policy: CollisionPolicy,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            component_markers: DEFAULT_COMPONENT_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}
