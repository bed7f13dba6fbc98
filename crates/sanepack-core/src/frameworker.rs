//! Packaging backend contract

use crate::error::Result;
use crate::package::Package;

/// A backend capable of building the scaffold a packaging toolchain needs
/// to create a distributable package.
///
/// A Debian backend, for example, creates a `debian/` directory populated
/// with control files and tells the user how to proceed. Callers select
/// backends through this trait only.
pub trait Frameworker {
    /// Instructions for the step the user performs once
    /// [`Frameworker::framework`] succeeds.
    fn info(&self) -> &'static str;

    /// Produce every file of the target's packaging scaffold.
    ///
    /// Stops at the first failing step and returns that error unchanged
    /// (wrapped as [`crate::Error::Backend`]).
    fn framework(&self, package: &Package) -> Result<()>;
}
