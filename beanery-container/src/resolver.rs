//! Dependency resolver: recursive constructor injection.
//!
//! [`DependencyResolver::resolve`] builds a bean for a type:
//! 1. a type already built during this pass is returned as is, even if its
//!    bean name was since overwritten by another type;
//! 2. derive the bean name; a bean of this type already registered under it
//!    is returned as is;
//! 3. take the type's first constructor;
//! 4. resolve every parameter recursively, in order;
//! 5. invoke the constructor and register the result.
//!
//! Recursion is not limited to components: any constructible type reached
//! as a parameter is built and registered, tagged or not.
//!
//! # Cycles
//! A type requested again while its own construction is in progress fails
//! with [`ContextError::CircularDependency`] instead of recursing without
//! bound. The in-progress set and the path used for error chains live in
//! the resolver, one per resolution pass.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, trace, warn};

use crate::descriptor::{Bean, TypeDescriptor};
use crate::error::{
    CircularDependencyError, ContextError, NameCollisionError, NoConstructorError, Result,
};
use crate::naming::BeanName;
use crate::registry::{BeanEntry, BeanRegistry};
use crate::settings::CollisionPolicy;

/// Builds beans into a [`BeanRegistry`] during one resolution pass.
pub struct DependencyResolver<'r> {
    registry: &'r mut BeanRegistry,
    collision_policy: CollisionPolicy,
    /// Beans built during this pass, by type
    built: HashMap<TypeId, Bean>,
    /// Types whose construction is in progress (for cycle detection)
    in_progress: HashSet<TypeId>,
    /// Current construction path (for error reporting)
    path: Vec<&'static str>,
    /// Constructor invocations during this pass
    constructed: usize,
}

impl<'r> DependencyResolver<'r> {
    /// Creates a resolver writing into `registry`.
    pub fn new(registry: &'r mut BeanRegistry, collision_policy: CollisionPolicy) -> Self {
        Self {
            registry,
            collision_policy,
            built: HashMap::new(),
            in_progress: HashSet::new(),
            path: Vec::new(),
            constructed: 0,
        }
    }

    /// Returns how many constructors this pass has invoked.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    /// Produces the bean for `descriptor`, building its dependencies first.
    ///
    /// # Errors
    /// - [`ContextError::CircularDependency`]: the type is already being built
    /// - [`ContextError::NoConstructor`]: the type, or a dependency, has no constructor
    /// - [`ContextError::ConstructionFailed`]: a constructor returned an error
    /// - [`ContextError::NameCollision`]: another type holds the bean name
    ///   (under [`CollisionPolicy::Reject`])
    #[instrument(skip_all, fields(type_name = descriptor.qualified_name()), level = "trace")]
    pub fn resolve(&mut self, descriptor: &TypeDescriptor) -> Result<Bean> {
        if let Some(bean) = self.built.get(&descriptor.type_id()) {
            trace!("Reusing bean built earlier in this pass");
            return Ok(bean.clone());
        }

        let name = BeanName::of(descriptor);

        if let Some(bean) = self.check_registered(&name, descriptor)? {
            trace!(bean = %name, "Reusing registered bean");
            return Ok(bean);
        }

        if self.in_progress.contains(&descriptor.type_id()) {
            return Err(self.cycle_error(descriptor));
        }

        self.in_progress.insert(descriptor.type_id());
        self.path.push(descriptor.qualified_name());

        let outcome = self.construct(descriptor);

        self.path.pop();
        self.in_progress.remove(&descriptor.type_id());

        let bean = outcome?;

        // A dependency may have claimed the name while this type was being built.
        self.check_registered(&name, descriptor)?;

        debug!(bean = %name, type_name = descriptor.qualified_name(), "Created bean");
        self.built.insert(descriptor.type_id(), bean.clone());
        self.registry
            .put(name, BeanEntry::new(descriptor, bean.clone()));
        Ok(bean)
    }

    /// Resolves the parameters of the first constructor, then invokes it.
    fn construct(&mut self, descriptor: &TypeDescriptor) -> Result<Bean> {
        let constructor = descriptor.primary_constructor().ok_or_else(|| {
            ContextError::NoConstructor(NoConstructorError {
                type_name: descriptor.qualified_name(),
                chain: self.path.clone(),
            })
        })?;

        let mut args = Vec::with_capacity(constructor.arity());
        for param in constructor.params() {
            args.push(self.resolve(&param())?);
        }

        self.constructed += 1;
        constructor
            .invoke(args)
            .map_err(|source| ContextError::ConstructionFailed {
                type_name: descriptor.qualified_name(),
                chain: self.path.clone(),
                source,
            })
    }

    /// Looks up `name`, applying the collision policy.
    ///
    /// Returns the registered bean if it was built from `descriptor`'s type.
    fn check_registered(
        &self,
        name: &BeanName,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<Bean>> {
        let Some(entry) = self.registry.get(name.as_str()) else {
            return Ok(None);
        };

        if entry.is_instance_of(descriptor) {
            return Ok(Some(entry.bean.clone()));
        }

        match self.collision_policy {
            CollisionPolicy::Reject => {
                let mut chain = self.path.clone();
                chain.push(descriptor.qualified_name());
                Err(ContextError::NameCollision(NameCollisionError {
                    name: name.to_string(),
                    existing: entry.type_name,
                    incoming: descriptor.qualified_name(),
                    chain,
                }))
            }
            CollisionPolicy::Overwrite => {
                warn!(
                    bean = %name,
                    existing = entry.type_name,
                    incoming = descriptor.qualified_name(),
                    "Bean name collision, overwriting"
                );
                Ok(None)
            }
        }
    }

    fn cycle_error(&self, descriptor: &TypeDescriptor) -> ContextError {
        let cycle_start = self
            .path
            .iter()
            .position(|name| *name == descriptor.qualified_name())
            .unwrap_or(0);

        let mut chain = self.path[cycle_start..].to_vec();
        chain.push(descriptor.qualified_name());

        warn!(cycle = ?chain, "Circular dependency detected");
        ContextError::CircularDependency(CircularDependencyError { chain })
    }
}

impl std::fmt::Debug for DependencyResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyResolver")
            .field("collision_policy", &self.collision_policy)
            .field("path", &self.path)
            .field("constructed", &self.constructed)
            .finish()
    }
}
