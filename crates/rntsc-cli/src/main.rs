#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rntsc")]
#[command(author, version, about = "React-Native-aware TypeScript compile driver", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// List the workspace packages discovered from the current directory
    Workspaces,

    /// Resolve module specifiers the way a platform compile would
    Resolve {
        /// Target platform (ios, android, windows, macos, win32, or custom)
        #[arg(long)]
        platform: Option<String>,

        /// Extra platform extensions, in probing order (e.g. "native,mobile")
        #[arg(
            long,
            visible_alias = "platformExtensions",
            value_delimiter = ',',
            value_name = "CSV"
        )]
        platform_extensions: Vec<String>,

        /// Keep `react-native` imports unsubstituted on out-of-tree platforms
        #[arg(
            long,
            visible_alias = "disableReactNativePackageSubstitution",
            requires = "platform"
        )]
        disable_react_native_package_substitution: bool,

        /// Report modules that fail to resolve
        #[arg(
            long,
            visible_alias = "traceReactNativeModuleResolutionErrors",
            requires = "platform"
        )]
        trace_react_native_module_resolution_errors: bool,

        /// Append resolution traces to this file instead of stdout
        #[arg(
            long,
            visible_alias = "traceResolutionLog",
            requires = "platform",
            value_name = "FILE"
        )]
        trace_resolution_log: Option<PathBuf>,

        /// Trace every resolution attempt, successful or not
        #[arg(long)]
        trace_resolution: bool,

        /// Let .js/.jsx sources participate in resolution
        #[arg(long)]
        check_js: bool,

        /// Let .json modules participate in resolution
        #[arg(long)]
        resolve_json_module: bool,

        /// The containing source file the specifiers appear in
        #[arg(long, value_name = "FILE")]
        from: PathBuf,

        /// Module specifiers to resolve, in order
        #[arg(required = true)]
        specifiers: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    logging::init(cli.verbose, cli.json);

    match cli.command {
        Some(Commands::Version) | None => {
            commands::version::run();
            Ok(())
        }
        Some(Commands::Workspaces) => commands::workspaces::run(&cwd, cli.json),
        Some(Commands::Resolve {
            platform,
            platform_extensions,
            disable_react_native_package_substitution,
            trace_react_native_module_resolution_errors,
            trace_resolution_log,
            trace_resolution,
            check_js,
            resolve_json_module,
            from,
            specifiers,
        }) => {
            let action = commands::resolve::ResolveAction {
                cwd,
                platform,
                platform_extensions,
                disable_react_native_package_substitution,
                trace_react_native_module_resolution_errors,
                trace_resolution_log,
                trace_resolution,
                check_js,
                resolve_json_module,
                from,
                specifiers,
                json: cli.json,
            };
            commands::resolve::run(action)
        }
    }
}
