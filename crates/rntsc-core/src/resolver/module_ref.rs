//! Module specifier classification.
//!
//! A specifier is either a package reference (`lodash`, `@scope/pkg/sub`)
//! or a file reference (`./App`, `/abs/path`, `C:\abs\path`). Builtins are
//! not classified here; the engine consults the builtin table only when
//! deciding whether to report a failure.

/// A parsed module specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRef {
    Package(PackageRef),
    File(FileRef),
}

/// Reference to an external or workspace package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    /// Scope without the leading `@`, e.g. `acme` for `@acme/ui`.
    pub scope: Option<String>,
    pub name: String,
    /// Path inside the package, without a leading separator.
    pub sub_path: Option<String>,
}

impl PackageRef {
    /// The package name as it appears under `node_modules`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.scope {
            Some(scope) => format!("@{scope}/{}", self.name),
            None => self.name.clone(),
        }
    }

    /// The sibling `@types` package carrying declarations for this package.
    ///
    /// Scoped names are mangled the way DefinitelyTyped publishes them:
    /// `@acme/ui` becomes `@types/acme__ui`.
    #[must_use]
    pub fn types_package(&self) -> PackageRef {
        let name = match &self.scope {
            Some(scope) => format!("{scope}__{}", self.name),
            None => self.name.clone(),
        };
        PackageRef {
            scope: Some("types".to_string()),
            name,
            sub_path: self.sub_path.clone(),
        }
    }
}

/// Reference to a file, relative to the containing file or absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub path: String,
}

impl ModuleRef {
    /// Classify a specifier.
    ///
    /// Anything that is neither a path nor a well-formed package name falls
    /// back to a file reference with the raw string; callers treat that as
    /// unresolvable.
    #[must_use]
    pub fn parse(spec: &str) -> ModuleRef {
        if spec.starts_with("./") || spec.starts_with("../") || is_absolute_path(spec) {
            return ModuleRef::File(FileRef {
                path: spec.to_string(),
            });
        }

        if let Some(package) = parse_package(spec) {
            return ModuleRef::Package(package);
        }

        ModuleRef::File(FileRef {
            path: spec.to_string(),
        })
    }
}

/// Check if a specifier is an absolute path.
fn is_absolute_path(spec: &str) -> bool {
    // Unix absolute
    if spec.starts_with('/') {
        return true;
    }

    // Windows absolute: C:\, D:/, etc.
    let bytes = spec.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return true;
    }

    // UNC path: \\server\share
    if spec.starts_with("\\\\") {
        return true;
    }

    false
}

/// Split a bare specifier into scope, name, and subpath.
///
/// Scoped packages consume two path segments (`@scope/pkg`), unscoped ones
/// a single segment. Head segments must be non-empty and free of path
/// separators.
fn parse_package(spec: &str) -> Option<PackageRef> {
    if spec.is_empty() || spec.contains('\\') {
        return None;
    }

    if let Some(rest) = spec.strip_prefix('@') {
        let (scope, rest) = rest.split_once('/')?;
        if scope.is_empty() {
            return None;
        }
        let (name, sub_path) = match rest.split_once('/') {
            Some((name, sub)) => (name, Some(sub)),
            None => (rest, None),
        };
        if name.is_empty() {
            return None;
        }
        return Some(PackageRef {
            scope: Some(scope.to_string()),
            name: name.to_string(),
            sub_path: sub_path.map(String::from),
        });
    }

    let (name, sub_path) = match spec.split_once('/') {
        Some((name, sub)) => (name, Some(sub)),
        None => (spec, None),
    };
    if name.is_empty() || name.starts_with('.') {
        return None;
    }
    Some(PackageRef {
        scope: None,
        name: name.to_string(),
        sub_path: sub_path.map(String::from),
    })
}
