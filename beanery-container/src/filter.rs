//! Eligibility filter: decides which discovered types are components.
//!
//! A type is a component when at least one of its tags is itself marked,
//! directly, with one of the configured component-defining markers.
//!
//! Exactly one level of tag-of-tag indirection is inspected. A tag that
//! is only marked with another tag which in turn carries a
//! component-defining marker does NOT qualify.

use std::collections::HashSet;

use crate::descriptor::TypeDescriptor;
use crate::stereotype::DEFAULT_COMPONENT_MARKERS;

/// Filters discovered types down to the build worklist.
#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    markers: HashSet<String>,
}

impl EligibilityFilter {
    /// Creates a filter accepting tags marked with any of `markers`.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `descriptor` is a component.
    pub fn is_eligible(&self, descriptor: &TypeDescriptor) -> bool {
        descriptor.tags().iter().any(|tag| {
            tag.markers()
                .iter()
                .any(|marker| self.markers.contains(*marker))
        })
    }

    /// Returns the configured component-defining markers.
    pub fn markers(&self) -> &HashSet<String> {
        &self.markers
    }
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_COMPONENT_MARKERS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::CapabilityTag;
    use crate::stereotype::{REPOSITORY, SERVICE};

    struct Plain;

    // Marked with a component-defining marker: one level, eligible.
    const SCHEDULED: CapabilityTag = CapabilityTag::new("Scheduled", &["Service"]);
    // Marked with `Scheduled`, which is itself marked: two levels, not eligible.
    const NIGHTLY: CapabilityTag = CapabilityTag::new("Nightly", &["Scheduled"]);
    // Not marked at all.
    const DEPRECATED: CapabilityTag = CapabilityTag::new("Deprecated", &[]);

    fn with_tags(tags: &'static [CapabilityTag]) -> TypeDescriptor {
        TypeDescriptor::of::<Plain>().with_tags(tags)
    }

    #[test]
    fn builtin_stereotypes_are_eligible() {
        let filter = EligibilityFilter::default();
        assert!(filter.is_eligible(&with_tags(&[SERVICE])));
        assert!(filter.is_eligible(&with_tags(&[REPOSITORY])));
    }

    #[test]
    fn untagged_type_is_not_eligible() {
        let filter = EligibilityFilter::default();
        assert!(!filter.is_eligible(&with_tags(&[])));
    }

    #[test]
    fn custom_tag_marked_with_service_is_eligible() {
        let filter = EligibilityFilter::default();
        assert!(filter.is_eligible(&with_tags(&[SCHEDULED])));
    }

    #[test]
    fn second_level_indirection_is_not_detected() {
        let filter = EligibilityFilter::default();
        assert!(!filter.is_eligible(&with_tags(&[NIGHTLY])));
    }

    #[test]
    fn any_matching_tag_is_enough() {
        let filter = EligibilityFilter::default();
        assert!(filter.is_eligible(&with_tags(&[DEPRECATED, SERVICE])));
        assert!(!filter.is_eligible(&with_tags(&[DEPRECATED, NIGHTLY])));
    }

    #[test]
    fn marker_set_is_configuration() {
        let filter = EligibilityFilter::new(["Scheduled"]);
        assert!(filter.is_eligible(&with_tags(&[NIGHTLY])));
        assert!(!filter.is_eligible(&with_tags(&[SERVICE])));
    }
}
