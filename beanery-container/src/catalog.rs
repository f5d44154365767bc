//! Type catalogs: where discovered types come from.
//!
//! A [`TypeCatalog`] exposes a hierarchical namespace: listing a namespace
//! returns its immediate entries (sub-namespaces and types), and a listed
//! type can be loaded into a [`TypeDescriptor`] by its qualified name.
//!
//! [`StaticCatalog`] is the implementation used in practice. Its global
//! instance is assembled from every [`ComponentRegistration`] submitted at
//! compile time (by `#[derive(Injectable)]` or [`register!`](crate::register)),
//! so no runtime introspection is needed.
//!
//! ```text
//! app                      ← namespace
//! ├── repo                 ← namespace
//! │   └── UserRepository   ← type  app::repo::UserRepository
//! └── UserService          ← type  app::UserService
//! ```

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::descriptor::{DescriptorFn, TypeDescriptor};
use crate::error::TypeLoadError;

/// Separator between namespace segments.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// An immediate child of a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogEntry {
    /// A nested namespace, by its last segment.
    Namespace(String),
    /// A type, by its simple name.
    Type(String),
}

/// Source of namespaces and loadable types.
pub trait TypeCatalog: Send + Sync {
    /// Lists the immediate entries of `namespace`.
    ///
    /// Returns `None` when the namespace does not exist or cannot be listed.
    /// The empty string names the root of the catalog.
    fn entries(&self, namespace: &str) -> Option<Vec<CatalogEntry>>;

    /// Loads the type listed under `qualified_name`.
    ///
    /// # Errors
    /// Returns a [`TypeLoadError`] when no descriptor exists for the name.
    fn load(&self, qualified_name: &str) -> Result<TypeDescriptor, TypeLoadError>;
}

/// Joins a namespace and a child segment.
///
/// ```
/// use beanery_container::catalog::join;
///
/// assert_eq!(join("app::repo", "UserRepository"), "app::repo::UserRepository");
/// assert_eq!(join("", "app"), "app");
/// ```
pub fn join(namespace: &str, segment: &str) -> String {
    if namespace.is_empty() {
        segment.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{segment}")
    }
}

/// Splits `app::repo::UserRepository` into `("app::repo", "UserRepository")`.
///
/// Generic arguments are kept with the last segment.
fn split_qualified(qualified_name: &str) -> (&str, &str) {
    let path_end = qualified_name.find('<').unwrap_or(qualified_name.len());
    match qualified_name[..path_end].rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => (
            &qualified_name[..idx],
            &qualified_name[idx + NAMESPACE_SEPARATOR.len()..],
        ),
        None => ("", qualified_name),
    }
}

// ============================================================
// Compile-time registration
// ============================================================

/// A type submitted to the global catalog at compile time.
#[derive(Debug)]
pub struct ComponentRegistration {
    descriptor: DescriptorFn,
}

impl ComponentRegistration {
    /// Registers the type described by `descriptor`.
    pub const fn new(descriptor: DescriptorFn) -> Self {
        Self { descriptor }
    }

    /// Returns the descriptor function.
    pub fn descriptor(&self) -> DescriptorFn {
        self.descriptor
    }
}

inventory::collect!(ComponentRegistration);

/// Submits a hand-written [`Injectable`](crate::Injectable) to the global catalog.
///
/// ```rust,ignore
/// struct Clock;
///
/// impl Injectable for Clock {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::of::<Self>()
///             .with_tags(&[COMPONENT])
///             .with_constructor(Constructor::new(&[], |_| Ok(Clock)))
///     }
/// }
///
/// beanery_container::register!(Clock);
/// ```
#[macro_export]
macro_rules! register {
    ($ty:ty) => {
        $crate::__private::inventory::submit! {
            $crate::catalog::ComponentRegistration::new(
                <$ty as $crate::descriptor::Injectable>::descriptor,
            )
        }
    };
}

static GLOBAL: Lazy<StaticCatalog> = Lazy::new(|| {
    let mut builder = CatalogBuilder::new();
    for registration in inventory::iter::<ComponentRegistration> {
        builder = builder.register(registration.descriptor());
    }
    let catalog = builder.build();
    debug!(types = catalog.len(), "Assembled global type catalog");
    catalog
});

// ============================================================
// StaticCatalog
// ============================================================

/// An in-memory namespace tree over registered descriptor functions.
///
/// Entries are listed in lexical order.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    namespaces: BTreeMap<String, BTreeSet<CatalogEntry>>,
    types: BTreeMap<String, DescriptorFn>,
}

impl StaticCatalog {
    /// Returns the process-wide catalog of compile-time registrations.
    pub fn global() -> &'static StaticCatalog {
        &GLOBAL
    }

    /// Starts an empty catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Returns the number of loadable types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type is loadable.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for StaticCatalog {
    fn entries(&self, namespace: &str) -> Option<Vec<CatalogEntry>> {
        self.namespaces
            .get(namespace)
            .map(|entries| entries.iter().cloned().collect())
    }

    fn load(&self, qualified_name: &str) -> Result<TypeDescriptor, TypeLoadError> {
        let descriptor = self.types.get(qualified_name).ok_or_else(|| TypeLoadError {
            qualified_name: qualified_name.to_string(),
            reason: "no descriptor registered".to_string(),
        })?;
        Ok(descriptor())
    }
}

/// Builds a [`StaticCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: StaticCatalog,
}

impl CatalogBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type under the qualified name its descriptor reports.
    ///
    /// Registering the same name twice keeps the last descriptor.
    pub fn register(mut self, descriptor: DescriptorFn) -> Self {
        let qualified_name = descriptor().qualified_name().to_string();
        self.list(&qualified_name);
        self.catalog.types.insert(qualified_name, descriptor);
        self
    }

    /// Lists `qualified_name` as a type without making it loadable.
    ///
    /// Loading it fails with a [`TypeLoadError`], like a stale artifact
    /// left behind in a build directory.
    pub fn declare_type(mut self, qualified_name: &str) -> Self {
        self.list(qualified_name);
        self
    }

    /// Finishes the catalog.
    pub fn build(self) -> StaticCatalog {
        self.catalog
    }

    /// Creates every namespace on the path to `qualified_name` and lists the
    /// type in its parent.
    fn list(&mut self, qualified_name: &str) {
        let (mut namespace, leaf) = split_qualified(qualified_name);
        self.catalog
            .namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(CatalogEntry::Type(leaf.to_string()));

        while !namespace.is_empty() {
            let (parent, segment) = split_qualified(namespace);
            self.catalog
                .namespaces
                .entry(parent.to_string())
                .or_default()
                .insert(CatalogEntry::Namespace(segment.to_string()));
            namespace = parent;
        }
    }
}
