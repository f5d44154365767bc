//! # Beanery: component scanning and constructor injection for Rust
//!
//! Types are tagged with capability tags and registered at compile time.
//! An [`ApplicationContext`] rooted at a namespace finds the tagged ones,
//! builds each through its constructor (injecting other beans as arguments)
//! and keeps one shared instance per bean name.
//!
//! ```rust
//! use std::sync::Arc;
//! use beanery::{ApplicationContext, Injectable, stereotype::{REPOSITORY, SERVICE}};
//!
//! #[derive(Injectable)]
//! #[injectable(tags(REPOSITORY))]
//! pub struct UserRepository;
//!
//! #[derive(Injectable)]
//! #[injectable(tags(SERVICE))]
//! pub struct UserService {
//!     repo: Arc<UserRepository>,
//! }
//!
//! let mut context = ApplicationContext::new(module_path!());
//! context.init().expect("Failed to initialize context");
//!
//! let service: Arc<UserService> = context.gen_bean("userService").expect("Missing bean");
//! let repo: Arc<UserRepository> = context.gen_bean("userRepository").expect("Missing bean");
//! assert!(Arc::ptr_eq(&service.repo, &repo));
//! ```

extern crate self as beanery;

pub use beanery_container::*;
pub use beanery_macros::*;
pub use beanery_support::*;
