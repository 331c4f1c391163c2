//! `rntsc resolve` command implementation.

use std::path::PathBuf;

use miette::Result;
use rntsc_core::version::SCHEMA_VERSION;
use rntsc_core::{CompilerOptions, Resolver, ResolverOptions, WorkspaceIndex};
use serde::Serialize;

/// Exit code for usage errors.
const EXIT_USAGE: i32 = 2;

/// Exit code for fatal resolver errors (malformed manifest, trace sink I/O).
const EXIT_INTERNAL: i32 = 5;

#[derive(Debug)]
pub struct ResolveAction {
    pub cwd: PathBuf,
    pub platform: Option<String>,
    pub platform_extensions: Vec<String>,
    pub disable_react_native_package_substitution: bool,
    pub trace_react_native_module_resolution_errors: bool,
    pub trace_resolution_log: Option<PathBuf>,
    pub trace_resolution: bool,
    pub check_js: bool,
    pub resolve_json_module: bool,
    pub from: PathBuf,
    pub specifiers: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    schema_version: u32,
    platform: String,
    containing_file: String,
    resolutions: Vec<ResolutionOutput>,
}

#[derive(Debug, Serialize)]
struct ResolutionOutput {
    specifier: String,
    resolved: Option<String>,
    extension: Option<String>,
}

/// Run the resolve command.
pub fn run(action: ResolveAction) -> Result<()> {
    let Some(platform) = action.platform else {
        eprintln!("error: 'rntsc resolve' requires --platform");
        std::process::exit(EXIT_USAGE);
    };

    let options = ResolverOptions::new(&platform)
        .with_platform_extensions(&action.platform_extensions)
        .with_package_substitution_disabled(action.disable_react_native_package_substitution)
        .with_trace_resolution_errors(action.trace_react_native_module_resolution_errors)
        .with_trace_resolution_log(action.trace_resolution_log);

    let compiler_options = CompilerOptions::default()
        .with_check_js(action.check_js)
        .with_resolve_json_module(action.resolve_json_module)
        .with_trace_resolution(action.trace_resolution);

    let workspaces = WorkspaceIndex::discover(&action.cwd);
    tracing::debug!(
        platform = %platform,
        workspaces = workspaces.workspaces().len(),
        "starting resolution batch"
    );

    let containing_file = if action.from.is_absolute() {
        action.from.clone()
    } else {
        action.cwd.join(&action.from)
    };
    let containing_file = containing_file.to_string_lossy().into_owned();

    let mut resolver = Resolver::new(options, compiler_options, workspaces);
    let names: Vec<&str> = action.specifiers.iter().map(String::as_str).collect();

    let resolutions = match resolver.resolve_module_names(&names, &containing_file) {
        Ok(resolutions) => resolutions,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(EXIT_INTERNAL);
        }
    };

    if action.json {
        let output = ResolveOutput {
            schema_version: SCHEMA_VERSION,
            platform,
            containing_file,
            resolutions: action
                .specifiers
                .iter()
                .zip(&resolutions)
                .map(|(specifier, resolved)| ResolutionOutput {
                    specifier: specifier.clone(),
                    resolved: resolved
                        .as_ref()
                        .map(|m| m.absolute_path.to_string_lossy().into_owned()),
                    extension: resolved.as_ref().map(|m| m.extension.to_string()),
                })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("resolve output serializes")
        );
    } else {
        for (specifier, resolved) in action.specifiers.iter().zip(&resolutions) {
            match resolved {
                Some(module) => {
                    println!("{specifier} -> {}", module.absolute_path.display());
                }
                None => println!("{specifier} -> (not resolved)"),
            }
        }
    }

    Ok(())
}
