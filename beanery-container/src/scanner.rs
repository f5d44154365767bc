//! Type enumerator: recursive namespace scanning.
//!
//! [`TypeEnumerator::scan`] walks a [`TypeCatalog`] depth-first from a root
//! namespace and lazily yields every type found beneath it.
//!
//! # Failure model
//! - a namespace that is missing or cannot be listed contributes nothing
//!   (soft-fail, logged at `trace`);
//! - a listed type that cannot be loaded yields an error; callers collecting
//!   with `?` abort at that point.

use tracing::trace;

use crate::catalog::{CatalogEntry, TypeCatalog, join};
use crate::descriptor::TypeDescriptor;
use crate::error::{ContextError, Result};

/// Walks a catalog's namespace tree.
#[derive(Clone, Copy)]
pub struct TypeEnumerator<'a> {
    catalog: &'a dyn TypeCatalog,
}

impl<'a> TypeEnumerator<'a> {
    /// Creates an enumerator over `catalog`.
    pub fn new(catalog: &'a dyn TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Starts a lazy scan of `root` and everything below it.
    ///
    /// Order follows the catalog's listing order; do not depend on it.
    pub fn scan(&self, root: &str) -> Scan<'a> {
        let listing = self.catalog.entries(root);
        let root_found = listing.is_some();
        if !root_found {
            trace!(namespace = root, "Root namespace not found");
        }

        let mut scan = Scan {
            catalog: self.catalog,
            pending: Vec::new(),
            root_found,
        };
        scan.push_listing(root, listing.unwrap_or_default());
        scan
    }
}

impl std::fmt::Debug for TypeEnumerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEnumerator").finish()
    }
}

/// A qualified catalog entry waiting to be visited.
#[derive(Debug)]
enum Pending {
    Namespace(String),
    Type(String),
}

/// Lazy iterator returned by [`TypeEnumerator::scan`].
pub struct Scan<'a> {
    catalog: &'a dyn TypeCatalog,
    /// Stack of entries; the next one to visit is on top.
    pending: Vec<Pending>,
    root_found: bool,
}

impl Scan<'_> {
    /// Returns `true` if the root namespace could be listed.
    pub fn root_found(&self) -> bool {
        self.root_found
    }

    fn push_listing(&mut self, namespace: &str, entries: Vec<CatalogEntry>) {
        // Reversed, so the first listed entry is visited first.
        for entry in entries.into_iter().rev() {
            self.pending.push(match entry {
                CatalogEntry::Namespace(segment) => Pending::Namespace(join(namespace, &segment)),
                CatalogEntry::Type(segment) => Pending::Type(join(namespace, &segment)),
            });
        }
    }
}

impl Iterator for Scan<'_> {
    type Item = Result<TypeDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(pending) = self.pending.pop() {
            match pending {
                Pending::Namespace(namespace) => match self.catalog.entries(&namespace) {
                    Some(entries) => self.push_listing(&namespace, entries),
                    None => trace!(namespace = %namespace, "Skipping unlistable namespace"),
                },
                Pending::Type(qualified_name) => {
                    trace!(type_name = %qualified_name, "Loading type");
                    return Some(self.catalog.load(&qualified_name).map_err(ContextError::TypeLoad));
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for Scan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scan")
            .field("pending", &self.pending)
            .field("root_found", &self.root_found)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::descriptor::Constructor;
    use crate::error::TypeLoadError;

    struct Alpha;
    struct Beta;
    struct Gamma;

    fn alpha() -> TypeDescriptor {
        TypeDescriptor::named::<Alpha>("app::Alpha")
            .with_constructor(Constructor::new(&[], |_| Ok(Alpha)))
    }

    fn beta() -> TypeDescriptor {
        TypeDescriptor::named::<Beta>("app::nested::deep::Beta")
            .with_constructor(Constructor::new(&[], |_| Ok(Beta)))
    }

    fn gamma() -> TypeDescriptor {
        TypeDescriptor::named::<Gamma>("other::Gamma")
            .with_constructor(Constructor::new(&[], |_| Ok(Gamma)))
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::builder()
            .register(alpha)
            .register(beta)
            .register(gamma)
            .build()
    }

    fn names(scan: Scan<'_>) -> Vec<&'static str> {
        scan.map(|d| d.unwrap().qualified_name()).collect()
    }

    #[test]
    fn scan_descends_recursively() {
        let cat = catalog();
        let found = names(TypeEnumerator::new(&cat).scan("app"));
        assert_eq!(found.len(), 2);
        assert!(found.contains(&"app::Alpha"));
        assert!(found.contains(&"app::nested::deep::Beta"));
    }

    #[test]
    fn scan_stays_under_root() {
        let cat = catalog();
        assert_eq!(names(TypeEnumerator::new(&cat).scan("other")), vec!["other::Gamma"]);
    }

    #[test]
    fn empty_root_scans_everything() {
        let cat = catalog();
        assert_eq!(names(TypeEnumerator::new(&cat).scan("")).len(), 3);
    }

    #[test]
    fn missing_root_is_empty() {
        let cat = catalog();
        let scan = TypeEnumerator::new(&cat).scan("billing");
        assert!(!scan.root_found());
        assert_eq!(scan.count(), 0);
    }

    #[test]
    fn scan_is_lazy_until_load_failure() {
        let cat = StaticCatalog::builder()
            .register(alpha)
            .declare_type("app::Broken")
            .build();

        let mut scan = TypeEnumerator::new(&cat).scan("app");
        assert!(scan.root_found());

        // `Alpha` sorts before `Broken`.
        assert_eq!(scan.next().unwrap().unwrap().qualified_name(), "app::Alpha");
        match scan.next().unwrap() {
            Err(ContextError::TypeLoad(TypeLoadError { qualified_name, .. })) => {
                assert_eq!(qualified_name, "app::Broken");
            }
            other => panic!("Expected TypeLoad, got: {other:?}"),
        }
        assert!(scan.next().is_none());
    }

    // A catalog whose sub-namespace listing fails.
    struct Flaky;

    impl TypeCatalog for Flaky {
        fn entries(&self, namespace: &str) -> Option<Vec<CatalogEntry>> {
            match namespace {
                "app" => Some(vec![
                    CatalogEntry::Namespace("locked".into()),
                    CatalogEntry::Type("Alpha".into()),
                ]),
                _ => None,
            }
        }

        fn load(&self, qualified_name: &str) -> std::result::Result<TypeDescriptor, TypeLoadError> {
            match qualified_name {
                "app::Alpha" => Ok(alpha()),
                _ => Err(TypeLoadError {
                    qualified_name: qualified_name.into(),
                    reason: "unknown".into(),
                }),
            }
        }
    }

    #[test]
    fn unlistable_sub_namespace_is_skipped() {
        assert_eq!(names(TypeEnumerator::new(&Flaky).scan("app")), vec!["app::Alpha"]);
    }
}
