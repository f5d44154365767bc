//! Bean names.
//!
//! [`BeanName`] is the registry key of a bean. It is derived from a type's
//! simple name with the first character lower-cased, so
//! `app::service::UserService` is registered as `userService`.

use std::borrow::Borrow;
use std::fmt;

use beanery_support::rendering::{decapitalize, simple_name};

use crate::descriptor::TypeDescriptor;

/// Registry key of a bean.
///
/// # Examples
/// ```
/// use beanery_container::naming::BeanName;
///
/// let name = BeanName::from_qualified("app::service::UserService");
/// assert_eq!(name.as_str(), "userService");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BeanName(String);

impl BeanName {
    /// Derives the bean name of a described type.
    #[inline]
    pub fn of(descriptor: &TypeDescriptor) -> Self {
        Self::from_qualified(descriptor.qualified_name())
    }

    /// Derives a bean name from a qualified type name.
    pub fn from_qualified(qualified_name: &str) -> Self {
        Self(decapitalize(simple_name(qualified_name)))
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BeanName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BeanName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BeanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
