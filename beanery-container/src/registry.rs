//! Bean registry: the single source of truth for built beans.
//!
//! The registry maps [`BeanName`] to constructed instances. It is filled
//! during one initialization pass and only read afterwards; there is no
//! removal.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::debug;

use crate::descriptor::{Bean, TypeDescriptor};
use crate::naming::BeanName;

/// A bean together with the identity of the type that produced it.
#[derive(Clone)]
pub struct BeanEntry {
    pub bean: Bean,
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl BeanEntry {
    /// Wraps a bean built for `descriptor`.
    pub fn new(descriptor: &TypeDescriptor, bean: Bean) -> Self {
        Self {
            bean,
            type_id: descriptor.type_id(),
            type_name: descriptor.qualified_name(),
        }
    }

    /// Returns `true` if this entry was built from `descriptor`'s type.
    #[inline]
    pub fn is_instance_of(&self, descriptor: &TypeDescriptor) -> bool {
        self.type_id == descriptor.type_id()
    }
}

impl std::fmt::Debug for BeanEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeanEntry")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Stores constructed beans by name.
#[derive(Debug, Default)]
pub struct BeanRegistry {
    beans: HashMap<BeanName, BeanEntry>,
}

impl BeanRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the entry registered under `name`.
    pub fn get(&self, name: &str) -> Option<&BeanEntry> {
        self.beans.get(name)
    }

    /// Inserts `entry` under `name`.
    ///
    /// Unconditional: a second insert under the same name replaces the
    /// first one and returns it.
    pub fn put(&mut self, name: BeanName, entry: BeanEntry) -> Option<BeanEntry> {
        debug!(bean = %name, type_name = entry.type_name, "Registered bean");
        self.beans.insert(name, entry)
    }

    /// Returns `true` if a bean is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.beans.contains_key(name)
    }

    /// Returns the number of registered beans.
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// Returns `true` if no bean is registered.
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.beans.keys().map(BeanName::as_str).collect();
        names.sort_unstable();
        names
    }
}
