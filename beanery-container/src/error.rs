//! Error types for context initialization and bean lookup.
//!
//! Resolution errors carry the dependency chain that led to the failing
//! type, so a broken wire deep in the graph points back to the component
//! that asked for it.

use std::fmt;

use beanery_support::rendering::{render_chain, shorten_type_name};

use crate::descriptor::BoxError;

/// Main error type for all Beanery operations.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// A catalog listed a type that could not be loaded.
    #[error("{}", .0)]
    TypeLoad(TypeLoadError),

    /// A type required for wiring exposes no constructor.
    #[error("{}", .0)]
    NoConstructor(NoConstructorError),

    /// A constructor factory returned an error.
    #[error("Failed to construct {}: {source}\n  Chain: {}", shorten_type_name(.type_name), render_chain(&shorten_all(.chain)))]
    ConstructionFailed {
        type_name: &'static str,
        chain: Vec<&'static str>,
        #[source]
        source: BoxError,
    },

    /// A type was requested again while its own construction was in progress.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// Two different types derive the same bean name.
    #[error("{}", .0)]
    NameCollision(NameCollisionError),

    /// No bean is registered under the requested name.
    #[error("{}", .0)]
    BeanNotFound(BeanNotFoundError),

    /// The bean exists but is not of the requested type.
    #[error("Bean '{name}' is a {actual}, not a {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// `init` was already run on this context.
    #[error("Context for namespace '{namespace}' is already initialized")]
    AlreadyInitialized { namespace: String },
}

/// A catalog entry that does not resolve to a loadable type.
#[derive(Debug)]
pub struct TypeLoadError {
    /// The qualified name the catalog listed.
    pub qualified_name: String,
    /// Why loading failed.
    pub reason: String,
}

impl fmt::Display for TypeLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load type {}: {}", self.qualified_name, self.reason)?;
        write!(
            f,
            "\n  Hint: the catalog lists this entry but no descriptor is registered for it"
        )
    }
}

/// A type without any constructor.
#[derive(Debug)]
pub struct NoConstructorError {
    /// The type that cannot be constructed.
    pub type_name: &'static str,
    /// The chain of types that required it, ending with `type_name`.
    pub chain: Vec<&'static str>,
}

impl fmt::Display for NoConstructorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No constructor for {}", self.type_name)?;
        if self.chain.len() > 1 {
            write!(f, "\n  Required by: {}", render_chain(&shorten_all(&self.chain)))?;
        }
        write!(
            f,
            "\n  Hint: primitives and abstract types cannot be injected; declare a constructor"
        )
    }
}

/// A dependency cycle.
///
/// The chain starts and ends with the same type.
#[derive(Debug)]
pub struct CircularDependencyError {
    /// Example: `["A", "B", "A"]`
    pub chain: Vec<&'static str>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circular dependency detected:\n  ")?;
        write!(f, "{}", render_chain(&shorten_all(&self.chain)))?;
        write!(
            f,
            "\n  Hint: constructor injection cannot satisfy a cycle; restructure the dependencies"
        )
    }
}

/// Two types mapping to one bean name.
#[derive(Debug)]
pub struct NameCollisionError {
    /// The contested bean name.
    pub name: String,
    /// The type already holding (or building) the name.
    pub existing: &'static str,
    /// The type that derived the same name.
    pub incoming: &'static str,
    /// The chain of types that required `incoming`, ending with it.
    pub chain: Vec<&'static str>,
}

impl fmt::Display for NameCollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bean name collision: '{}' is derived by both {} and {}",
            self.name, self.existing, self.incoming,
        )?;
        if self.chain.len() > 1 {
            write!(f, "\n  Required by: {}", render_chain(&shorten_all(&self.chain)))?;
        }
        write!(
            f,
            "\n  Hint: rename one of the types, or set collision_policy = \"overwrite\""
        )
    }
}

/// Lookup of a name that was never registered.
#[derive(Debug)]
pub struct BeanNotFoundError {
    /// The requested bean name.
    pub name: String,
    /// Registered names close to the requested one.
    pub suggestions: Vec<String>,
}

impl fmt::Display for BeanNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No bean named '{}'", self.name)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        Ok(())
    }
}

fn shorten_all(chain: &[&'static str]) -> Vec<String> {
    chain.iter().map(|name| shorten_type_name(name)).collect()
}

/// Convenient Result type for Beanery operations.
pub type Result<T> = std::result::Result<T, ContextError>;
