//! React-Native-aware module resolution.
//!
//! Locates the file behind each module specifier the way the platform
//! toolchain does: platform-suffixed files first, workspace packages before
//! `node_modules`, typings before runtime entry points.

pub mod engine;
pub mod extensions;
pub mod finder;
pub mod locator;
pub mod module_ref;
pub mod package;
pub mod platform;
pub mod probe;
pub mod trace;

pub use engine::{
    should_show_resolver_failure, CacheEntry, CompilerHost, ResolvedTypeReference, Resolver,
};
pub use extensions::{allowed_extensions, Extension};
pub use finder::{find_module_file, ResolvedModule};
pub use locator::{find_package_dependency_dir, resolve_package};
pub use module_ref::{FileRef, ModuleRef, PackageRef};
pub use package::{read_manifest, resolve_entry_point, PackageManifest};
pub use trace::{TraceLog, TraceMode, TraceSink};
