//! The closed, ordered set of file extensions the resolver accepts.
//!
//! Precedence is positional everywhere: matching an already-suffixed
//! specifier walks [`Extension::ALL`] in order, and probing walks the
//! allowed table in the order it was built.

use crate::config::CompilerOptions;

/// A file extension the resolver can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Dts,
    Ts,
    Tsx,
    Js,
    Jsx,
    Json,
}

impl Extension {
    /// Every accepted extension, in specifier-matching precedence order.
    /// `.d.ts` precedes `.ts` so that `foo.d.ts` never matches as `.ts`.
    pub const ALL: [Extension; 6] = [
        Extension::Dts,
        Extension::Ts,
        Extension::Tsx,
        Extension::Js,
        Extension::Jsx,
        Extension::Json,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Dts => ".d.ts",
            Extension::Ts => ".ts",
            Extension::Tsx => ".tsx",
            Extension::Js => ".js",
            Extension::Jsx => ".jsx",
            Extension::Json => ".json",
        }
    }

    /// Match the extension a path already carries, if any.
    #[must_use]
    pub fn of(path: &str) -> Option<Extension> {
        Extension::ALL
            .into_iter()
            .find(|ext| path.ends_with(ext.as_str()))
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the ordered allowed-extension table for one containing file.
///
/// A `.d.ts` containing file may only pull in declarations; `.ts` stays in
/// the table so a specifier written as `./foo.d` still reaches `./foo.d.ts`.
#[must_use]
pub fn allowed_extensions(containing_file: &str, options: &CompilerOptions) -> Vec<Extension> {
    if containing_file.ends_with(".d.ts") {
        return vec![Extension::Dts, Extension::Ts];
    }

    let mut allowed = vec![Extension::Ts, Extension::Tsx, Extension::Dts];
    if options.check_js {
        allowed.push(Extension::Js);
        allowed.push(Extension::Jsx);
    }
    if options.resolve_json_module {
        allowed.push(Extension::Json);
    }
    allowed
}
