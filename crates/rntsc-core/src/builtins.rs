//! Reserved specifier tables.
//!
//! Node builtin modules and bundler-handled asset extensions never resolve
//! to a source file; the engine uses these tables to decide whether a failed
//! resolution is worth reporting.

/// Node builtin module names.
///
/// Kept sorted for readability; lookup is a linear scan over a small table.
const NODE_BUILTINS: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// File extensions handled by the React-Native bundler rather than the
/// compiler: multimedia assets plus stylesheets.
const ASSET_EXTENSIONS: &[&str] = &[
    "aac", "aiff", "bmp", "caf", "css", "gif", "html", "jpeg", "jpg", "m4a", "m4v", "mov", "mp3",
    "mp4", "mpeg", "mpg", "obj", "otf", "pdf", "png", "psd", "svg", "ttf", "wav", "webm", "webp",
];

/// Whether a specifier names a Node builtin module.
///
/// Covers the bare builtin names plus any specifier using the `node:` scheme
/// (matched case-insensitively).
#[must_use]
pub fn is_builtin(spec: &str) -> bool {
    if spec.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("node:")) {
        return true;
    }
    NODE_BUILTINS.contains(&spec)
}

/// Whether a specifier's file extension marks it as a bundler asset.
#[must_use]
pub fn is_asset(spec: &str) -> bool {
    let Some(ext) = std::path::Path::new(spec).extension() else {
        return false;
    };
    let Some(ext) = ext.to_str() else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ASSET_EXTENSIONS.contains(&ext.as_str())
}
