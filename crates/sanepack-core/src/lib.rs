//! Core types and traits for sanepack
//!
//! This crate provides the package descriptor, the backend contract every
//! packaging target implements, and the shared error types.

pub mod error;
pub mod frameworker;
pub mod package;

pub use error::{Error, Result};
pub use frameworker::Frameworker;
pub use package::{Copyright, FileCopyright, Package, Person};
