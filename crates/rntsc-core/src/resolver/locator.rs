//! External package lookup under `node_modules`.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::resolver::extensions::Extension;
use crate::resolver::finder::ResolvedModule;
use crate::resolver::module_ref::PackageRef;
use crate::resolver::package::resolve_entry_point;
use crate::resolver::probe;
use crate::resolver::trace::TraceLog;

/// Locate a package directory by walking `node_modules` upward from
/// `start_dir`, node-style.
pub fn find_package_dependency_dir(
    package: &PackageRef,
    start_dir: &Path,
    trace: &mut TraceLog,
) -> Result<Option<PathBuf>, Error> {
    let qualified = package.qualified_name();
    let mut current = Some(start_dir);

    while let Some(dir) = current {
        let candidate = dir.join("node_modules").join(&qualified);
        if probe::is_directory(&candidate, trace)? {
            return Ok(Some(candidate));
        }
        current = dir.parent();
    }

    Ok(None)
}

/// Resolve an external package reference to a module file.
///
/// The package itself is tried first; a sub-path miss retries the package
/// entry point declarations-only to accommodate type-only sidecar layouts.
/// When the package yields nothing, the sibling `@types` package is tried
/// the same way, declarations only.
pub fn resolve_package(
    package: &PackageRef,
    start_dir: &Path,
    allowed: &[Extension],
    platform_extensions: &[String],
    trace: &mut TraceLog,
) -> Result<Option<ResolvedModule>, Error> {
    if let Some(module) =
        locate_and_resolve(package, start_dir, allowed, platform_extensions, trace)?
    {
        return Ok(Some(module));
    }

    let types_package = package.types_package();
    locate_and_resolve(
        &types_package,
        start_dir,
        &[Extension::Dts],
        platform_extensions,
        trace,
    )
}

fn locate_and_resolve(
    package: &PackageRef,
    start_dir: &Path,
    allowed: &[Extension],
    platform_extensions: &[String],
    trace: &mut TraceLog,
) -> Result<Option<ResolvedModule>, Error> {
    let Some(pkg_dir) = find_package_dependency_dir(package, start_dir, trace)? else {
        return Ok(None);
    };

    if let Some(module) = resolve_entry_point(
        &pkg_dir,
        package.sub_path.as_deref(),
        allowed,
        platform_extensions,
        trace,
    )? {
        return Ok(Some(module));
    }

    if package.sub_path.is_some() {
        return resolve_entry_point(&pkg_dir, None, &[Extension::Dts], platform_extensions, trace);
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::module_ref::ModuleRef;
    use crate::resolver::trace::{TraceMode, TraceSink};
    use std::fs;
    use tempfile::tempdir;

    const TS_ALLOWED: &[Extension] = &[Extension::Ts, Extension::Tsx, Extension::Dts];

    fn ios_exts() -> Vec<String> {
        vec![".ios".to_string(), String::new()]
    }

    fn quiet_trace() -> TraceLog {
        TraceLog::new(TraceMode::Never, TraceSink::Stdout)
    }

    fn package_ref(spec: &str) -> PackageRef {
        match ModuleRef::parse(spec) {
            ModuleRef::Package(p) => p,
            ModuleRef::File(_) => panic!("expected package ref for {spec}"),
        }
    }

    #[test]
    fn test_walks_up_to_nearest_node_modules() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("left-pad");
        fs::create_dir_all(&pkg).unwrap();
        let deep = dir.path().join("apps").join("mobile").join("src");
        fs::create_dir_all(&deep).unwrap();

        let found =
            find_package_dependency_dir(&package_ref("left-pad"), &deep, &mut quiet_trace())
                .unwrap();
        assert_eq!(found, Some(pkg));
    }

    #[test]
    fn test_nearer_node_modules_shadows_farther() {
        let dir = tempdir().unwrap();
        let outer = dir.path().join("node_modules").join("dep");
        fs::create_dir_all(&outer).unwrap();
        let app = dir.path().join("app");
        let inner = app.join("node_modules").join("dep");
        fs::create_dir_all(&inner).unwrap();

        let found = find_package_dependency_dir(&package_ref("dep"), &app, &mut quiet_trace())
            .unwrap();
        assert_eq!(found, Some(inner));
    }

    #[test]
    fn test_scoped_package_dir() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("@acme").join("ui");
        fs::create_dir_all(&pkg).unwrap();

        let found =
            find_package_dependency_dir(&package_ref("@acme/ui"), dir.path(), &mut quiet_trace())
                .unwrap();
        assert_eq!(found, Some(pkg));
    }

    #[test]
    fn test_resolves_subpath_inside_package() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("react-native-windows");
        let libs = pkg.join("Libraries");
        fs::create_dir_all(&libs).unwrap();
        fs::write(pkg.join("package.json"), r#"{"name": "react-native-windows"}"#).unwrap();
        fs::write(libs.join("Foo.windows.ts"), "").unwrap();

        let windows_exts = vec![".windows".to_string(), String::new()];
        let m = resolve_package(
            &package_ref("react-native-windows/Libraries/Foo"),
            dir.path(),
            TS_ALLOWED,
            &windows_exts,
            &mut quiet_trace(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(m.absolute_path, libs.join("Foo.windows.ts"));
    }

    #[test]
    fn test_subpath_miss_retries_declaration_entry_point() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("node_modules").join("sidecar");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(
            pkg.join("package.json"),
            r#"{"name": "sidecar", "types": "index.d.ts"}"#,
        )
        .unwrap();
        fs::write(pkg.join("index.d.ts"), "").unwrap();

        let m = resolve_package(
            &package_ref("sidecar/feature"),
            dir.path(),
            TS_ALLOWED,
            &ios_exts(),
            &mut quiet_trace(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(m.absolute_path, pkg.join("index.d.ts"));
    }

    #[test]
    fn test_at_types_fallback() {
        let dir = tempdir().unwrap();
        let types = dir.path().join("node_modules").join("@types").join("lodash");
        fs::create_dir_all(&types).unwrap();
        fs::write(types.join("package.json"), r#"{"name": "@types/lodash"}"#).unwrap();
        fs::write(types.join("isString.d.ts"), "").unwrap();

        let m = resolve_package(
            &package_ref("lodash/isString"),
            dir.path(),
            TS_ALLOWED,
            &ios_exts(),
            &mut quiet_trace(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(m.absolute_path, types.join("isString.d.ts"));
    }

    #[test]
    fn test_at_types_fallback_mangles_scoped_names() {
        let dir = tempdir().unwrap();
        let types = dir
            .path()
            .join("node_modules")
            .join("@types")
            .join("acme__ui");
        fs::create_dir_all(&types).unwrap();
        fs::write(
            types.join("package.json"),
            r#"{"name": "@types/acme__ui", "types": "index.d.ts"}"#,
        )
        .unwrap();
        fs::write(types.join("index.d.ts"), "").unwrap();

        let m = resolve_package(
            &package_ref("@acme/ui"),
            dir.path(),
            TS_ALLOWED,
            &ios_exts(),
            &mut quiet_trace(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(m.absolute_path, types.join("index.d.ts"));
    }

    #[test]
    fn test_at_types_never_yields_sources() {
        let dir = tempdir().unwrap();
        let types = dir.path().join("node_modules").join("@types").join("dep");
        fs::create_dir_all(&types).unwrap();
        fs::write(types.join("package.json"), r#"{"name": "@types/dep"}"#).unwrap();
        fs::write(types.join("index.ts"), "").unwrap();

        let m = resolve_package(
            &package_ref("dep"),
            dir.path(),
            TS_ALLOWED,
            &ios_exts(),
            &mut quiet_trace(),
        )
        .unwrap();
        assert!(m.is_none());
    }

    #[test]
    fn test_unknown_package_is_none() {
        let dir = tempdir().unwrap();
        let m = resolve_package(
            &package_ref("ghost"),
            dir.path(),
            TS_ALLOWED,
            &ios_exts(),
            &mut quiet_trace(),
        )
        .unwrap();
        assert!(m.is_none());
    }
}
