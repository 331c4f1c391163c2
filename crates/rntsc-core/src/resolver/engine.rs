//! The resolver engine.
//!
//! Orchestrates one trace transaction per specifier: platform substitution,
//! workspace lookup, then package or file search, with the outcome deciding
//! whether the buffered trace flushes.

use std::path::PathBuf;

use crate::builtins;
use crate::config::{CompilerOptions, ResolverOptions};
use crate::error::Error;
use crate::paths;
use crate::resolver::extensions::{allowed_extensions, Extension};
use crate::resolver::finder::{find_module_file, ResolvedModule};
use crate::resolver::locator::resolve_package;
use crate::resolver::module_ref::ModuleRef;
use crate::resolver::package::resolve_entry_point;
use crate::resolver::platform;
use crate::resolver::trace::TraceLog;
use crate::workspace::WorkspaceIndex;

/// A type reference directive resolved by the wrapped compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTypeReference {
    pub absolute_path: PathBuf,
}

/// A cached resolution carried by the wrapped compiler.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub resolved: Option<ResolvedModule>,
    pub failed_lookup_locations: Vec<String>,
}

/// The wrapped compiler's own resolver, delegated to for the operations
/// this resolver does not reimplement.
pub trait CompilerHost {
    fn resolve_type_reference_directive(
        &self,
        name: &str,
        containing_file: &str,
    ) -> Option<ResolvedTypeReference>;

    fn resolved_module_from_cache(
        &self,
        name: &str,
        containing_file: &str,
    ) -> Option<CacheEntry>;
}

/// React-Native-aware module resolver.
///
/// One instance serves one compile; it owns the workspace index and the
/// trace log, and is not shared across threads.
pub struct Resolver {
    options: ResolverOptions,
    compiler_options: CompilerOptions,
    workspaces: WorkspaceIndex,
    host: Option<Box<dyn CompilerHost>>,
    trace: TraceLog,
}

impl Resolver {
    /// Build a resolver over a pre-enumerated workspace index.
    #[must_use]
    pub fn new(
        options: ResolverOptions,
        compiler_options: CompilerOptions,
        workspaces: WorkspaceIndex,
    ) -> Self {
        let trace = TraceLog::new(options.trace_mode(&compiler_options), options.trace_sink());
        tracing::debug!(
            platform = %options.platform,
            workspaces = workspaces.workspaces().len(),
            "resolver constructed"
        );
        Self {
            options,
            compiler_options,
            workspaces,
            host: None,
            trace,
        }
    }

    /// Attach the wrapped compiler's default resolver.
    #[must_use]
    pub fn with_host(mut self, host: Box<dyn CompilerHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Resolve a batch of specifiers appearing in one containing file.
    ///
    /// The result array is positional: entry *k* answers specifier *k*.
    pub fn resolve_module_names(
        &mut self,
        names: &[&str],
        containing_file: &str,
    ) -> Result<Vec<Option<ResolvedModule>>, Error> {
        let allowed = allowed_extensions(containing_file, &self.compiler_options);
        let mut resolutions = Vec::with_capacity(names.len());
        for name in names {
            resolutions.push(self.resolve_one(name, containing_file, &allowed)?);
        }
        Ok(resolutions)
    }

    fn resolve_one(
        &mut self,
        name: &str,
        containing_file: &str,
        allowed: &[Extension],
    ) -> Result<Option<ResolvedModule>, Error> {
        self.trace.begin();
        self.trace.log(format!(
            "======== Resolving module '{name}' from '{containing_file}' ========"
        ))?;

        let effective = platform::substitute(
            name,
            &self.options.platform,
            self.options.disable_react_native_package_substitution,
            &mut self.trace,
        )?;

        let containing_dir = paths::containing_dir(containing_file);
        let platform_extensions = &self.options.platform_extensions;

        let resolved = if let Some(m) = self.workspaces.query_module_ref(&effective, containing_file)
        {
            self.trace.log(format!(
                "Loading module '{effective}' from workspace '{}'.",
                m.workspace.root.display()
            ))?;
            resolve_entry_point(
                &m.workspace.root,
                m.sub_path.as_deref(),
                allowed,
                platform_extensions,
                &mut self.trace,
            )?
        } else {
            match ModuleRef::parse(&effective) {
                ModuleRef::Package(package) => resolve_package(
                    &package,
                    &containing_dir,
                    allowed,
                    platform_extensions,
                    &mut self.trace,
                )?,
                ModuleRef::File(file) => {
                    self.trace.log(format!(
                        "Searching for module '{effective}' in directory '{}'.",
                        containing_dir.display()
                    ))?;
                    find_module_file(
                        &containing_dir,
                        &file.path,
                        allowed,
                        platform_extensions,
                        &mut self.trace,
                    )?
                }
            }
        };

        match &resolved {
            Some(module) => {
                self.trace.log(format!(
                    "File {} exists - using it as a module resolution result.",
                    module.absolute_path.display()
                ))?;
                self.trace.log(format!(
                    "======== Module name '{name}' was successfully resolved to '{}' ========",
                    module.absolute_path.display()
                ))?;
                self.trace.end_success()?;
            }
            None => {
                self.trace
                    .log(format!("Failed to resolve module {name} to a file."))?;
                self.trace.log(format!(
                    "======== Module name '{name}' was not resolved ========"
                ))?;
                if should_show_resolver_failure(name) {
                    self.trace.end_failure()?;
                } else {
                    self.trace.reset();
                }
            }
        }

        Ok(resolved)
    }

    /// Resolve type reference directives through the wrapped compiler.
    pub fn resolve_type_reference_directives(
        &mut self,
        names: &[&str],
        containing_file: &str,
    ) -> Result<Vec<Option<ResolvedTypeReference>>, Error> {
        self.trace.begin();
        let resolutions = names
            .iter()
            .map(|name| {
                self.host
                    .as_ref()
                    .and_then(|host| host.resolve_type_reference_directive(name, containing_file))
            })
            .collect();
        self.trace.end_success()?;
        Ok(resolutions)
    }

    /// Probe the wrapped compiler's resolution cache.
    pub fn resolved_module_from_cache(
        &mut self,
        name: &str,
        containing_file: &str,
    ) -> Result<Option<CacheEntry>, Error> {
        self.trace.begin();
        let entry = self
            .host
            .as_ref()
            .and_then(|host| host.resolved_module_from_cache(name, containing_file));
        self.trace.end_success()?;
        Ok(entry)
    }

    /// Record a standalone trace line on behalf of the compiler.
    pub fn trace(&mut self, message: &str) -> Result<(), Error> {
        self.trace.log(message)
    }
}

/// Whether a failed resolution is worth surfacing.
///
/// Builtins, `node:` specifiers, and bundler-handled assets are expected to
/// miss; reporting them would bury the real failures.
#[must_use]
pub fn should_show_resolver_failure(name: &str) -> bool {
    !builtins::is_builtin(name) && !builtins::is_asset(name)
}
