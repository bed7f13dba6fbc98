//! CLI command implementations

pub mod framework;
pub mod init;

pub use framework::FrameworkCommand;
pub use init::InitCommand;
