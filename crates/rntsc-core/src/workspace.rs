//! Workspace discovery and lookup for monorepos.
//!
//! The set of in-repo packages is enumerated once, from the `workspaces`
//! field of the root `package.json` (array and yarn-style object forms),
//! and is immutable afterwards. Resolution consults the index before any
//! `node_modules` walk so a workspace always shadows an external package
//! of the same name.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::paths;
use crate::resolver::module_ref::ModuleRef;
use crate::resolver::package::PackageManifest;

/// An in-repo package discovered at startup.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Package name from its manifest.
    pub name: String,
    /// Absolute, normalized root directory.
    pub root: PathBuf,
    /// The package manifest, as read at discovery time.
    pub manifest: PackageManifest,
}

/// A specifier that landed inside a workspace.
#[derive(Debug)]
pub struct WorkspaceMatch<'a> {
    pub workspace: &'a Workspace,
    /// Path below the workspace root, when the specifier names one.
    pub sub_path: Option<String>,
}

/// Immutable index over the discovered workspaces.
#[derive(Debug, Default)]
pub struct WorkspaceIndex {
    workspaces: Vec<Workspace>,
}

impl WorkspaceIndex {
    /// Build an index from pre-enumerated workspaces (injected in tests).
    #[must_use]
    pub fn new(workspaces: Vec<Workspace>) -> Self {
        Self { workspaces }
    }

    /// Enumerate the monorepo rooted at `cwd`.
    ///
    /// A missing or workspace-less root manifest yields an empty index;
    /// member directories without a readable manifest are skipped.
    #[must_use]
    pub fn discover(cwd: &Path) -> Self {
        Self::new(enumerate_workspaces(cwd))
    }

    #[must_use]
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    /// Find a workspace by exact package name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.name == name)
    }

    /// Find the workspace whose root contains `path`.
    ///
    /// Containment is component-wise, so `packages/ui` never claims files
    /// under `packages/ui-theme`.
    #[must_use]
    pub fn containing_path(&self, path: &Path) -> Option<&Workspace> {
        self.workspaces
            .iter()
            .find(|w| path.strip_prefix(&w.root).is_ok())
    }

    /// Match a specifier against the index.
    ///
    /// Package specifiers match by workspace name; file specifiers match
    /// when the path they denote falls under a workspace root.
    #[must_use]
    pub fn query_module_ref(&self, spec: &str, containing_file: &str) -> Option<WorkspaceMatch<'_>> {
        match ModuleRef::parse(spec) {
            ModuleRef::Package(package) => {
                let workspace = self.by_name(&package.qualified_name())?;
                Some(WorkspaceMatch {
                    workspace,
                    sub_path: package.sub_path,
                })
            }
            ModuleRef::File(file) => {
                let absolute =
                    paths::normalize(&paths::containing_dir(containing_file).join(&file.path));
                let workspace = self.containing_path(&absolute)?;
                let sub_path = match absolute.strip_prefix(&workspace.root) {
                    Ok(rest) if !rest.as_os_str().is_empty() => {
                        Some(rest.to_string_lossy().replace('\\', "/"))
                    }
                    _ => None,
                };
                Some(WorkspaceMatch {
                    workspace,
                    sub_path,
                })
            }
        }
    }
}

/// Enumerate workspace packages declared by the root `package.json`.
#[must_use]
pub fn enumerate_workspaces(cwd: &Path) -> Vec<Workspace> {
    let Ok(contents) = std::fs::read_to_string(cwd.join("package.json")) else {
        return Vec::new();
    };
    let Ok(root_manifest) = serde_json::from_str::<Value>(&contents) else {
        return Vec::new();
    };
    let Some(workspaces) = root_manifest.get("workspaces") else {
        return Vec::new();
    };

    // Either an array of patterns or a yarn-style {"packages": [...]}.
    let patterns: Vec<String> = match workspaces {
        Value::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Value::Object(obj) => obj
            .get("packages")
            .and_then(|p| p.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
        _ => return Vec::new(),
    };

    let mut found = Vec::new();
    for pattern in &patterns {
        let full_pattern = cwd.join(pattern);
        let Ok(entries) = glob::glob(&full_pattern.to_string_lossy()) else {
            continue;
        };
        for entry in entries.flatten() {
            if let Some(workspace) = read_workspace(&entry) {
                found.push(workspace);
            }
        }
    }
    found
}

/// Read one workspace member; directories without a named manifest are
/// not workspaces.
fn read_workspace(dir: &Path) -> Option<Workspace> {
    if !dir.is_dir() {
        return None;
    }
    let contents = std::fs::read_to_string(dir.join("package.json")).ok()?;
    let manifest: PackageManifest = serde_json::from_str(&contents).ok()?;
    let name = manifest.name.clone()?;

    Some(Workspace {
        name,
        root: paths::normalize(dir),
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_member(root: &Path, rel: &str, manifest: &str) -> PathBuf {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), manifest).unwrap();
        dir
    }

    fn monorepo() -> (tempfile::TempDir, WorkspaceIndex) {
        let root = tempdir().unwrap();
        fs::write(
            root.path().join("package.json"),
            r#"{"name": "repo", "workspaces": ["packages/*"]}"#,
        )
        .unwrap();
        write_member(
            root.path(),
            "packages/ui",
            r#"{"name": "@acme/ui", "version": "1.0.0", "main": "lib/index.js"}"#,
        );
        write_member(
            root.path(),
            "packages/ui-theme",
            r#"{"name": "@acme/ui-theme", "version": "1.0.0"}"#,
        );
        let index = WorkspaceIndex::discover(root.path());
        (root, index)
    }

    #[test]
    fn test_discover_array_form() {
        let (_root, index) = monorepo();
        assert_eq!(index.workspaces().len(), 2);
        assert!(index.by_name("@acme/ui").is_some());
        assert!(index.by_name("@acme/ui-theme").is_some());
        assert!(index.by_name("@acme/other").is_none());
    }

    #[test]
    fn test_discover_object_form() {
        let root = tempdir().unwrap();
        fs::write(
            root.path().join("package.json"),
            r#"{"name": "repo", "workspaces": {"packages": ["libs/*"]}}"#,
        )
        .unwrap();
        write_member(root.path(), "libs/util", r#"{"name": "util"}"#);

        let index = WorkspaceIndex::discover(root.path());
        assert!(index.by_name("util").is_some());
    }

    #[test]
    fn test_discover_without_workspaces_is_empty() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("package.json"), r#"{"name": "plain"}"#).unwrap();
        assert!(WorkspaceIndex::discover(root.path()).workspaces().is_empty());
    }

    #[test]
    fn test_member_without_name_is_skipped() {
        let root = tempdir().unwrap();
        fs::write(
            root.path().join("package.json"),
            r#"{"name": "repo", "workspaces": ["packages/*"]}"#,
        )
        .unwrap();
        write_member(root.path(), "packages/anon", r#"{"version": "0.1.0"}"#);

        assert!(WorkspaceIndex::discover(root.path()).workspaces().is_empty());
    }

    #[test]
    fn test_query_by_package_name() {
        let (_root, index) = monorepo();
        let m = index
            .query_module_ref("@acme/ui/lib/Button", "/anywhere/x.ts")
            .unwrap();
        assert_eq!(m.workspace.name, "@acme/ui");
        assert_eq!(m.sub_path.as_deref(), Some("lib/Button"));
    }

    #[test]
    fn test_query_by_file_path() {
        let (root, index) = monorepo();
        let containing = root.path().join("packages/ui/src/App.ts");
        let m = index
            .query_module_ref("./theme", &containing.to_string_lossy())
            .unwrap();
        assert_eq!(m.workspace.name, "@acme/ui");
        assert_eq!(m.sub_path.as_deref(), Some("src/theme"));
    }

    #[test]
    fn test_query_file_path_crossing_workspaces() {
        let (root, index) = monorepo();
        let containing = root.path().join("packages/ui/src/App.ts");
        let m = index
            .query_module_ref("../../ui-theme/colors", &containing.to_string_lossy())
            .unwrap();
        assert_eq!(m.workspace.name, "@acme/ui-theme");
        assert_eq!(m.sub_path.as_deref(), Some("colors"));
    }

    #[test]
    fn test_sibling_prefix_does_not_match() {
        let (root, index) = monorepo();
        // ui-theme is not inside ui even though the string is a prefix.
        let inside_theme = root.path().join("packages/ui-theme/src");
        let containing = inside_theme.join("x.ts");
        let m = index
            .query_module_ref("./colors", &containing.to_string_lossy())
            .unwrap();
        assert_eq!(m.workspace.name, "@acme/ui-theme");
    }

    #[test]
    fn test_query_outside_any_workspace_is_none() {
        let (root, index) = monorepo();
        let containing = root.path().join("tools/build.ts");
        assert!(index
            .query_module_ref("./helper", &containing.to_string_lossy())
            .is_none());
        assert!(index.query_module_ref("lodash", "/x.ts").is_none());
    }
}
