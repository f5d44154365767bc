//! Core discovery-and-wiring engine for Beanery.

pub mod catalog;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod settings;
pub mod stereotype;

pub use catalog::{CatalogBuilder, CatalogEntry, ComponentRegistration, StaticCatalog, TypeCatalog};
pub use context::{ApplicationContext, ContextBuilder, InitReport, prelude};
pub use descriptor::{
    Arguments, Bean, BoxError, CapabilityTag, Constructor, DescriptorFn, Injectable,
    TypeDescriptor,
};
pub use error::{ContextError, Result};
pub use naming::BeanName;
pub use settings::{CollisionPolicy, ContextSettings};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
