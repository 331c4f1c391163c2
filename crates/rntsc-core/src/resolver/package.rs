//! Package manifests and entry-point resolution.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::resolver::extensions::Extension;
use crate::resolver::finder::{find_module_file, ResolvedModule};
use crate::resolver::trace::TraceLog;

/// The subset of `package.json` the resolver reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    pub name: Option<String>,
    pub types: Option<String>,
    pub typings: Option<String>,
    pub main: Option<String>,
    pub homepage: Option<String>,
    pub version: Option<String>,
}

/// Read `package.json` from a package directory.
///
/// A missing manifest degrades to the empty manifest (resolution falls
/// through to the `index` search); a malformed one is fatal, with the
/// offending directory in the error.
pub fn read_manifest(pkg_dir: &Path) -> Result<PackageManifest, Error> {
    let path = pkg_dir.join("package.json");
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Ok(PackageManifest::default());
        }
        Err(source) => {
            return Err(Error::ManifestRead {
                dir: pkg_dir.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&contents).map_err(|source| Error::ManifestParse {
        dir: pkg_dir.to_path_buf(),
        source,
    })
}

/// Resolve a package directory to a module file.
///
/// With a sub-path the search goes straight to the file finder. Otherwise
/// the manifest picks the entry point: `types`/`typings` when declarations
/// are acceptable, then `main`, then the `index` fallback.
pub fn resolve_entry_point(
    pkg_dir: &Path,
    sub_path: Option<&str>,
    allowed: &[Extension],
    platform_extensions: &[String],
    trace: &mut TraceLog,
) -> Result<Option<ResolvedModule>, Error> {
    if let Some(sub_path) = sub_path {
        return find_module_file(pkg_dir, sub_path, allowed, platform_extensions, trace);
    }

    let manifest = read_manifest(pkg_dir)?;

    if allowed.contains(&Extension::Dts) {
        let typed = match (&manifest.types, &manifest.typings) {
            (Some(types), _) => Some(("types", types)),
            (None, Some(typings)) => Some(("typings", typings)),
            (None, None) => None,
        };
        if let Some((field, value)) = typed {
            trace.log(format!("Package has '{field}' field '{value}'."))?;
            if let Some(module) =
                find_module_file(pkg_dir, value, allowed, platform_extensions, trace)?
            {
                return Ok(Some(module));
            }
        }
    }

    if let Some(main) = &manifest.main {
        trace.log(format!("Package has 'main' field '{main}'."))?;
        if let Some(module) = find_module_file(pkg_dir, main, allowed, platform_extensions, trace)?
        {
            return Ok(Some(module));
        }
    }

    find_module_file(pkg_dir, "index", allowed, platform_extensions, trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::trace::{TraceMode, TraceSink};
    use std::fs;
    use tempfile::tempdir;

    const ALL_ALLOWED: &[Extension] = &[
        Extension::Ts,
        Extension::Tsx,
        Extension::Dts,
        Extension::Js,
        Extension::Jsx,
    ];

    fn ios_exts() -> Vec<String> {
        vec![".ios".to_string(), String::new()]
    }

    fn quiet_trace() -> TraceLog {
        TraceLog::new(TraceMode::Never, TraceSink::Stdout)
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let dir = tempdir().unwrap();
        let manifest = read_manifest(dir.path()).unwrap();
        assert!(manifest.name.is_none());
        assert!(manifest.main.is_none());
    }

    #[test]
    fn test_malformed_manifest_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{not json").unwrap();

        let err = read_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_subpath_bypasses_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "pkg", "main": "lib/other.js"}"#,
        )
        .unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        fs::write(lib.join("Button.ts"), "").unwrap();

        let m = resolve_entry_point(
            dir.path(),
            Some("lib/Button"),
            ALL_ALLOWED,
            &ios_exts(),
            &mut quiet_trace(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(m.absolute_path, lib.join("Button.ts"));
    }

    #[test]
    fn test_types_beats_main() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "pkg", "types": "index.d.ts", "main": "index.js"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("index.d.ts"), "").unwrap();
        fs::write(dir.path().join("index.js"), "").unwrap();

        let m = resolve_entry_point(dir.path(), None, ALL_ALLOWED, &ios_exts(), &mut quiet_trace())
            .unwrap()
            .unwrap();
        assert_eq!(m.extension, Extension::Dts);
    }

    #[test]
    fn test_typings_when_types_absent() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "pkg", "typings": "lib/api.d.ts"}"#,
        )
        .unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        fs::write(lib.join("api.d.ts"), "").unwrap();

        let m = resolve_entry_point(dir.path(), None, ALL_ALLOWED, &ios_exts(), &mut quiet_trace())
            .unwrap()
            .unwrap();
        assert_eq!(m.absolute_path, lib.join("api.d.ts"));
    }

    #[test]
    fn test_typings_ignored_without_dts_in_table() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "pkg", "types": "index.d.ts", "main": "index.js"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("index.d.ts"), "").unwrap();
        fs::write(dir.path().join("index.js"), "").unwrap();

        let js_only = [Extension::Js];
        let m = resolve_entry_point(dir.path(), None, &js_only, &ios_exts(), &mut quiet_trace())
            .unwrap()
            .unwrap();
        assert_eq!(m.extension, Extension::Js);
    }

    #[test]
    fn test_main_resolves_platform_first() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "pkg", "main": "lib/index.js"}"#,
        )
        .unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        fs::write(lib.join("index.ios.js"), "").unwrap();
        fs::write(lib.join("index.js"), "").unwrap();

        let m = resolve_entry_point(dir.path(), None, ALL_ALLOWED, &ios_exts(), &mut quiet_trace())
            .unwrap()
            .unwrap();
        assert_eq!(m.absolute_path, lib.join("index.ios.js"));
    }

    #[test]
    fn test_index_fallback_when_main_misses() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "pkg", "main": "lib/index.js"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("index.ts"), "").unwrap();

        let m = resolve_entry_point(dir.path(), None, ALL_ALLOWED, &ios_exts(), &mut quiet_trace())
            .unwrap()
            .unwrap();
        assert_eq!(m.absolute_path, dir.path().join("index.ts"));
    }

    #[test]
    fn test_consulted_fields_are_traced() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("trace.log");
        let pkg = dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(
            pkg.join("package.json"),
            r#"{"name": "pkg", "types": "api.d.ts", "main": "api.js"}"#,
        )
        .unwrap();
        fs::write(pkg.join("api.js"), "").unwrap();

        let mut trace = TraceLog::new(TraceMode::Always, TraceSink::File(log_path.clone()));
        trace.begin();
        let m = resolve_entry_point(&pkg, None, ALL_ALLOWED, &ios_exts(), &mut trace)
            .unwrap()
            .unwrap();
        trace.end_success().unwrap();
        assert_eq!(m.extension, Extension::Js);

        let contents = fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("Package has 'types' field 'api.d.ts'."));
        assert!(contents.contains("Package has 'main' field 'api.js'."));
    }
}
