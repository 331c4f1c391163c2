//! Logging initialization for the CLI.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for
//! command output and flushed resolution traces, which have their own sink
//! and never pass through here.

use tracing_subscriber::{fmt, EnvFilter};

/// Map the `-v` count to a filter directive.
///
/// The driver is quiet by default, like the compiler it wraps. The rntsc
/// crates are opened up before the rest of the dependency tree, and
/// everything only goes to TRACE at `-vvv`: a single compile can probe
/// thousands of paths, and that detail belongs in the resolution trace,
/// not the diagnostic log.
fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,rntsc_core=info,rntsc_cli=info",
        2 => "warn,rntsc_core=debug,rntsc_cli=debug",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber.
///
/// A `RUST_LOG` value replaces the verbosity-derived filter entirely.
///
/// # Panics
/// Panics if a subscriber is already installed.
pub fn init(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}
