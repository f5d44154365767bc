//! # The ApplicationContext: heart of Beanery
//!
//! Discovers components under a namespace, wires their constructor
//! dependencies and keeps the resulting singletons by bean name.
//!
//! # Architecture
//! ```text
//! TypeCatalog ──scan──> TypeEnumerator ──> EligibilityFilter ──> worklist
//!                                                                   │
//!                                                             resolve each
//!                                                                   ▼
//!                          BeanRegistry <──put/get── DependencyResolver
//! ```
//!
//! Initialization runs in two phases: every type under the namespace is
//! discovered first, then the eligible ones are built in discovery order.
//!
//! # Examples
//! ```rust
//! use std::sync::Arc;
//! use beanery_container::prelude::*;
//!
//! struct Database;
//! struct UserService { db: Arc<Database> }
//!
//! fn database() -> TypeDescriptor {
//!     TypeDescriptor::named::<Database>("app::Database")
//!         .with_constructor(Constructor::new(&[], |_| Ok(Database)))
//! }
//!
//! fn user_service() -> TypeDescriptor {
//!     TypeDescriptor::named::<UserService>("app::UserService")
//!         .with_tags(&[SERVICE])
//!         .with_constructor(Constructor::new(&[database], |mut args| {
//!             Ok(UserService { db: args.take()? })
//!         }))
//! }
//!
//! let catalog = StaticCatalog::builder().register(database).register(user_service).build();
//! let mut context = ApplicationContext::builder("app").catalog(catalog).build();
//! context.init().expect("Failed to initialize context");
//!
//! let service: Arc<UserService> = context.gen_bean("userService").expect("Missing bean");
//! let db: Arc<Database> = context.gen_bean("database").expect("Missing bean");
//! assert!(Arc::ptr_eq(&service.db, &db));
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use beanery_support::rendering::suggest_similar;
use tracing::{debug, error, info, instrument};

use crate::catalog::{StaticCatalog, TypeCatalog};
use crate::descriptor::TypeDescriptor;
use crate::error::{BeanNotFoundError, ContextError, Result};
use crate::filter::EligibilityFilter;
use crate::registry::BeanRegistry;
use crate::resolver::DependencyResolver;
use crate::scanner::TypeEnumerator;
use crate::settings::{CollisionPolicy, ContextSettings};

// ============================================================
// ContextBuilder
// ============================================================

/// Builds an [`ApplicationContext`].
///
/// Defaults to the global compile-time catalog and
/// [`ContextSettings::default()`].
pub struct ContextBuilder {
    namespace: String,
    catalog: Option<Arc<dyn TypeCatalog>>,
    settings: ContextSettings,
}

impl ContextBuilder {
    fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            catalog: None,
            settings: ContextSettings::default(),
        }
    }

    /// Scans `catalog` instead of the global one.
    pub fn catalog(mut self, catalog: impl TypeCatalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Scans a shared catalog instead of the global one.
    pub fn shared_catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replaces all settings.
    pub fn settings(mut self, settings: ContextSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the meta-tag names that make a tag component-defining.
    pub fn component_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.component_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the bean name collision policy.
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.settings.collision_policy = policy;
        self
    }

    /// Creates the context. No scanning happens until [`ApplicationContext::init`].
    pub fn build(self) -> ApplicationContext {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(GlobalCatalog) as Arc<dyn TypeCatalog>);

        ApplicationContext {
            filter: EligibilityFilter::new(self.settings.component_markers.iter().cloned()),
            namespace: self.namespace,
            catalog,
            settings: self.settings,
            registry: BeanRegistry::new(),
            initialized: false,
        }
    }
}

impl fmt::Debug for ContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBuilder")
            .field("namespace", &self.namespace)
            .field("custom_catalog", &self.catalog.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Delegates to [`StaticCatalog::global()`] so it can live behind an `Arc`.
struct GlobalCatalog;

impl TypeCatalog for GlobalCatalog {
    fn entries(&self, namespace: &str) -> Option<Vec<crate::catalog::CatalogEntry>> {
        StaticCatalog::global().entries(namespace)
    }

    fn load(
        &self,
        qualified_name: &str,
    ) -> std::result::Result<TypeDescriptor, crate::error::TypeLoadError> {
        StaticCatalog::global().load(qualified_name)
    }
}

// ============================================================
// InitReport
// ============================================================

/// Summary of one initialization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Whether the root namespace exists in the catalog.
    pub root_found: bool,
    /// Types found under the namespace.
    pub discovered: usize,
    /// Qualified names of the components, in build order.
    pub components: Vec<&'static str>,
    /// Beans registered, components and their dependencies alike.
    pub beans: usize,
}

// ============================================================
// ApplicationContext
// ============================================================

/// Owns the beans discovered under one namespace.
///
/// Created empty; [`init`](ApplicationContext::init) fills it once.
pub struct ApplicationContext {
    namespace: String,
    catalog: Arc<dyn TypeCatalog>,
    filter: EligibilityFilter,
    settings: ContextSettings,
    registry: BeanRegistry,
    initialized: bool,
}

impl ApplicationContext {
    /// Creates a context over the global catalog with default settings.
    ///
    /// Only records the namespace; nothing is scanned yet.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::builder(namespace).build()
    }

    /// Creates a builder for a context rooted at `namespace`.
    pub fn builder(namespace: impl Into<String>) -> ContextBuilder {
        ContextBuilder::new(namespace)
    }

    /// Discovers the components under the namespace and builds them.
    ///
    /// A namespace missing from the catalog is not an error: the report
    /// says `root_found: false` and nothing is built.
    ///
    /// # Errors
    /// Fails on the first type that cannot be loaded or wired. Beans built
    /// before the failure stay registered.
    #[instrument(skip(self), fields(namespace = %self.namespace), name = "context_init")]
    pub fn init(&mut self) -> Result<InitReport> {
        if self.initialized {
            return Err(ContextError::AlreadyInitialized {
                namespace: self.namespace.clone(),
            });
        }
        self.initialized = true;

        info!("Initializing application context");

        // Phase 1: discover everything before building anything.
        let mut scan = TypeEnumerator::new(self.catalog.as_ref()).scan(&self.namespace);
        let discovered = scan.by_ref().collect::<Result<Vec<TypeDescriptor>>>()?;
        let root_found = scan.root_found();

        let worklist: Vec<TypeDescriptor> = discovered
            .iter()
            .filter(|descriptor| {
                let eligible = self.filter.is_eligible(descriptor);
                debug!(type_name = descriptor.qualified_name(), eligible, "Discovered type");
                eligible
            })
            .cloned()
            .collect();

        // Phase 2: build the worklist.
        let mut resolver =
            DependencyResolver::new(&mut self.registry, self.settings.collision_policy);
        for descriptor in &worklist {
            resolver.resolve(descriptor)?;
        }

        let report = InitReport {
            root_found,
            discovered: discovered.len(),
            components: worklist.iter().map(TypeDescriptor::qualified_name).collect(),
            beans: self.registry.len(),
        };

        info!(
            discovered = report.discovered,
            components = report.components.len(),
            beans = report.beans,
            "Application context initialized ✓"
        );
        Ok(report)
    }

    /// Runs [`init`](ApplicationContext::init), logging and swallowing any error.
    ///
    /// Beans built before a failure stay available; the rest are missing.
    pub fn init_best_effort(&mut self) {
        if let Err(err) = self.init() {
            error!(namespace = %self.namespace, error = %err, "Failed to prepare beans");
        }
    }

    /// Returns the bean registered under `name`.
    ///
    /// ```rust,ignore
    /// let service: Arc<UserService> = context.gen_bean("userService")?;
    /// ```
    ///
    /// # Errors
    /// - [`ContextError::BeanNotFound`]: nothing is registered under `name`
    /// - [`ContextError::TypeMismatch`]: the bean is not a `T`
    pub fn gen_bean<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let entry = self.registry.get(name).ok_or_else(|| {
            ContextError::BeanNotFound(BeanNotFoundError {
                name: name.to_string(),
                suggestions: suggest_similar(name, &self.registry.names(), 3),
            })
        })?;

        entry
            .bean
            .clone()
            .downcast::<T>()
            .map_err(|_| ContextError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
                actual: entry.type_name,
            })
    }

    /// Returns `true` if a bean is registered under `name`.
    pub fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Returns every registered bean name, sorted.
    pub fn bean_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Returns the root namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the settings in effect.
    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    /// Returns `true` once `init` has run, successfully or not.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("namespace", &self.namespace)
            .field("beans", &self.registry.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{ApplicationContext, ContextBuilder, InitReport};
    pub use crate::catalog::{CatalogBuilder, StaticCatalog, TypeCatalog};
    pub use crate::descriptor::{
        Arguments, Bean, BoxError, CapabilityTag, Constructor, Injectable, TypeDescriptor,
    };
    pub use crate::error::{ContextError, Result};
    pub use crate::settings::{CollisionPolicy, ContextSettings};
    pub use crate::stereotype::{COMPONENT, CONFIGURATION, REPOSITORY, SERVICE};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
