//! Type descriptors: the container's view of a constructible type.
//!
//! A [`TypeDescriptor`] carries everything the container needs to wire a
//! type without runtime introspection: its qualified name, its runtime
//! identity, the [`CapabilityTag`]s attached to it, and its constructors.
//!
//! Parameters are referenced through [`DescriptorFn`]s rather than
//! descriptors, so a type may describe a dependency on itself (or on a type
//! that depends back on it) without recursing while being described.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// A constructed bean, shared between the registry and its consumers.
pub type Bean = Arc<dyn Any + Send + Sync>;

/// Error type returned by constructor factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Lazily produces the descriptor of a constructor parameter.
pub type DescriptorFn = fn() -> TypeDescriptor;

/// Factory invoked with the resolved arguments of a constructor.
pub type FactoryFn = Arc<dyn Fn(Arguments) -> Result<Bean, BoxError> + Send + Sync>;

/// A type that can describe how it is constructed.
///
/// Usually implemented with `#[derive(Injectable)]`; hand-written
/// implementations are registered with [`register!`](crate::register).
pub trait Injectable: Any + Send + Sync {
    /// Describes this type: name, tags and constructors.
    fn descriptor() -> TypeDescriptor;
}

/// A marker attached to a type.
///
/// `markers` lists the names of the meta-tags carried by this tag. A type
/// is a component when one of its tags carries a component-defining
/// meta-tag; see [`EligibilityFilter`](crate::filter::EligibilityFilter).
///
/// # Examples
/// ```
/// use beanery_container::descriptor::CapabilityTag;
///
/// // A custom stereotype that marks components, like `Service` does.
/// pub const HANDLER: CapabilityTag = CapabilityTag::new("Handler", &["Component"]);
/// assert!(HANDLER.has_marker("Component"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityTag {
    name: &'static str,
    markers: &'static [&'static str],
}

impl CapabilityTag {
    /// Creates a tag named `name` carrying the given meta-tags.
    pub const fn new(name: &'static str, markers: &'static [&'static str]) -> Self {
        Self { name, markers }
    }

    /// Returns the tag's name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the meta-tags this tag is marked with.
    #[inline]
    pub fn markers(&self) -> &'static [&'static str] {
        self.markers
    }

    /// Returns `true` if this tag is directly marked with `marker`.
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| *m == marker)
    }
}

impl fmt::Display for CapabilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

/// One public constructor: ordered parameters plus the factory.
#[derive(Clone)]
pub struct Constructor {
    params: Vec<DescriptorFn>,
    factory: FactoryFn,
}

impl Constructor {
    /// Creates a constructor whose factory receives one argument per
    /// entry of `params`, in the same order.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use beanery_container::descriptor::{Constructor, TypeDescriptor};
    ///
    /// struct Clock;
    /// struct Scheduler { clock: Arc<Clock> }
    ///
    /// fn clock() -> TypeDescriptor {
    ///     TypeDescriptor::of::<Clock>().with_constructor(Constructor::new(&[], |_| Ok(Clock)))
    /// }
    ///
    /// let ctor = Constructor::new(&[clock], |mut args| {
    ///     Ok(Scheduler { clock: args.take::<Clock>()? })
    /// });
    /// assert_eq!(ctor.arity(), 1);
    /// ```
    pub fn new<T, F>(params: &[DescriptorFn], factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Arguments) -> Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            params: params.to_vec(),
            factory: Arc::new(move |args: Arguments| {
                factory(args).map(|value| Arc::new(value) as Bean)
            }),
        }
    }

    /// Returns the parameter descriptors, in order.
    #[inline]
    pub fn params(&self) -> &[DescriptorFn] {
        &self.params
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Invokes the factory with already resolved arguments.
    pub(crate) fn invoke(&self, args: Vec<Bean>) -> Result<Bean, BoxError> {
        (self.factory)(Arguments::new(args))
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("arity", &self.params.len())
            .finish()
    }
}

/// Resolved constructor arguments, consumed in parameter order.
#[derive(Debug)]
pub struct Arguments {
    values: std::vec::IntoIter<Bean>,
    position: usize,
}

impl Arguments {
    pub(crate) fn new(values: Vec<Bean>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Takes the next argument as an `Arc<T>`.
    ///
    /// # Errors
    /// Fails when the arguments are exhausted or the next argument is not
    /// a `T`.
    pub fn take<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>, BoxError> {
        let position = self.position;
        self.position += 1;

        let value = self.values.next().ok_or_else(|| {
            format!("missing constructor argument #{position} ({})", type_name::<T>())
        })?;

        value.downcast::<T>().map_err(|_| {
            format!(
                "constructor argument #{position} is not a {}",
                type_name::<T>()
            )
            .into()
        })
    }

    /// Returns the number of arguments not taken yet.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// Describes a concrete, constructible type.
///
/// Immutable once built; cloning is cheap.
#[derive(Clone)]
pub struct TypeDescriptor {
    type_id: TypeId,
    qualified_name: &'static str,
    tags: &'static [CapabilityTag],
    constructors: Vec<Constructor>,
}

impl TypeDescriptor {
    /// Starts a descriptor for `T`, named after its Rust path.
    ///
    /// The descriptor has no tags and no constructors until added.
    pub fn of<T: Any + Send + Sync>() -> Self {
        Self::named::<T>(type_name::<T>())
    }

    /// Starts a descriptor for `T` under an explicit qualified name.
    pub fn named<T: Any + Send + Sync>(qualified_name: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            qualified_name,
            tags: &[],
            constructors: Vec::new(),
        }
    }

    /// Attaches capability tags.
    pub fn with_tags(mut self, tags: &'static [CapabilityTag]) -> Self {
        self.tags = tags;
        self
    }

    /// Appends a constructor.
    ///
    /// When several constructors are declared, only the first one is ever
    /// used; their order carries no meaning beyond that.
    pub fn with_constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully qualified name, e.g. `app::service::UserService`.
    #[inline]
    pub fn qualified_name(&self) -> &'static str {
        self.qualified_name
    }

    /// Returns the unqualified name, e.g. `UserService`.
    pub fn simple_name(&self) -> &'static str {
        beanery_support::rendering::simple_name(self.qualified_name)
    }

    /// Returns the attached capability tags.
    #[inline]
    pub fn tags(&self) -> &'static [CapabilityTag] {
        self.tags
    }

    /// Returns the declared constructors.
    #[inline]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// Returns the constructor used for wiring: the first one declared.
    pub fn primary_constructor(&self) -> Option<&Constructor> {
        self.constructors.first()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.qualified_name == other.qualified_name
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.qualified_name)
            .field("tags", &self.tags)
            .field("constructors", &self.constructors.len())
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name)
    }
}
