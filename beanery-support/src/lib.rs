//! # Beanery Support
//!
//! Shared text helpers for the Beanery IoC container:
//! - dependency chain rendering for error messages
//! - simple-name and bean-name derivation
//! - "did you mean?" suggestions

pub mod rendering;
