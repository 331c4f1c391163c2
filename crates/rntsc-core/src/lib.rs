#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod builtins;
pub mod config;
pub mod error;
pub mod paths;
pub mod resolver;
pub mod version;
pub mod workspace;

pub use config::{CompilerOptions, ResolverOptions};
pub use error::Error;
pub use resolver::{
    CompilerHost, Extension, ResolvedModule, Resolver, TraceLog, TraceMode, TraceSink,
};
pub use version::VERSION;
pub use workspace::{enumerate_workspaces, Workspace, WorkspaceIndex};
