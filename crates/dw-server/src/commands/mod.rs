//! Subcommands of the `dewhale` binary

pub mod catalog;
pub mod refine;
pub mod serve;

pub use catalog::catalog_command;
pub use refine::refine_command;
pub use serve::serve_command;
