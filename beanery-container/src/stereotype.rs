//! Built-in capability tags.
//!
//! The default vocabulary: `Component`, `Service`, `Repository` and
//! `Configuration`. Each carries the `Component` meta-tag, so a type tagged
//! with any of them is eligible under [`DEFAULT_COMPONENT_MARKERS`].
//!
//! Applications are free to define their own tags; only the marker names
//! configured on the context decide eligibility.

use crate::descriptor::CapabilityTag;

/// Generic component.
pub const COMPONENT: CapabilityTag = CapabilityTag::new("Component", &["Component"]);

/// Business service.
pub const SERVICE: CapabilityTag = CapabilityTag::new("Service", &["Component"]);

/// Data access object.
pub const REPOSITORY: CapabilityTag = CapabilityTag::new("Repository", &["Component"]);

/// Configuration holder.
pub const CONFIGURATION: CapabilityTag = CapabilityTag::new("Configuration", &["Component"]);

/// Marker names that define components when no explicit set is configured.
pub const DEFAULT_COMPONENT_MARKERS: &[&str] = &[
    "Component",
    "Service",
    "Repository",
    "Configuration",
];
