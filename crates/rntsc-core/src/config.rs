use std::path::PathBuf;

use crate::resolver::trace::{TraceMode, TraceSink};

/// Subset of the wrapped compiler's options the resolver depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerOptions {
    /// Allow `.js`/`.jsx` sources to participate in resolution.
    pub check_js: bool,

    /// Allow `.json` modules to participate in resolution.
    pub resolve_json_module: bool,

    /// Trace every resolution attempt, successful or not.
    pub trace_resolution: bool,
}

impl CompilerOptions {
    #[must_use]
    pub fn with_check_js(mut self, check_js: bool) -> Self {
        self.check_js = check_js;
        self
    }

    #[must_use]
    pub fn with_resolve_json_module(mut self, resolve_json_module: bool) -> Self {
        self.resolve_json_module = resolve_json_module;
        self
    }

    #[must_use]
    pub fn with_trace_resolution(mut self, trace_resolution: bool) -> Self {
        self.trace_resolution = trace_resolution;
        self
    }
}

/// Construction-time resolver options.
///
/// `platform` is lowercased and the extra platform extensions get their
/// leading `.` prepended here, once; downstream code never massages either
/// again.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Target platform (e.g. `ios`, `android`, `windows`), lowercased.
    pub platform: String,

    /// Ordered platform file extensions used in probing:
    /// `[".<platform>", ".<extra>", ..., ""]`. The empty entry means
    /// "no platform suffix" and is always last.
    pub platform_extensions: Vec<String>,

    /// Skip the `react-native` package-name substitution.
    pub disable_react_native_package_substitution: bool,

    /// Report resolution failures even when `trace_resolution` is off.
    pub trace_resolution_errors: bool,

    /// Write trace records to this file instead of stdout.
    pub trace_resolution_log: Option<PathBuf>,
}

impl ResolverOptions {
    /// Create options for a platform with no extra platform extensions.
    #[must_use]
    pub fn new(platform: &str) -> Self {
        Self {
            platform: platform.to_lowercase(),
            platform_extensions: vec![format!(".{}", platform.to_lowercase()), String::new()],
            disable_react_native_package_substitution: false,
            trace_resolution_errors: false,
            trace_resolution_log: None,
        }
    }

    /// Set the extra platform extensions (bare tokens such as `native`).
    ///
    /// The probing order becomes `.<platform>`, then each extra in the
    /// order given, then the no-suffix entry.
    #[must_use]
    pub fn with_platform_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = vec![format!(".{}", self.platform)];
        list.extend(
            extensions
                .into_iter()
                .map(|e| format!(".{}", e.as_ref())),
        );
        list.push(String::new());
        self.platform_extensions = list;
        self
    }

    #[must_use]
    pub fn with_package_substitution_disabled(mut self, disabled: bool) -> Self {
        self.disable_react_native_package_substitution = disabled;
        self
    }

    #[must_use]
    pub fn with_trace_resolution_errors(mut self, enabled: bool) -> Self {
        self.trace_resolution_errors = enabled;
        self
    }

    #[must_use]
    pub fn with_trace_resolution_log(mut self, path: Option<PathBuf>) -> Self {
        self.trace_resolution_log = path;
        self
    }

    /// Derive the trace mode from resolver and compiler options.
    ///
    /// `traceResolution` wins; the per-failure flag is the fallback.
    #[must_use]
    pub fn trace_mode(&self, compiler_options: &CompilerOptions) -> TraceMode {
        if compiler_options.trace_resolution {
            TraceMode::Always
        } else if self.trace_resolution_errors {
            TraceMode::OnFailure
        } else {
            TraceMode::Never
        }
    }

    /// Derive the trace sink from resolver options.
    #[must_use]
    pub fn trace_sink(&self) -> TraceSink {
        match &self.trace_resolution_log {
            Some(path) => TraceSink::File(path.clone()),
            None => TraceSink::Stdout,
        }
    }
}
