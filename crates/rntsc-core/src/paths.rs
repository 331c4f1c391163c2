//! Path helpers shared across the resolver.

use std::path::{Component, Path, PathBuf};

/// Directory of the containing source file.
///
/// Compiler hosts hand us file names as strings; an empty or root-less name
/// degrades to `.` so downstream joins stay well-formed.
#[must_use]
pub fn containing_dir(containing_file: &str) -> PathBuf {
    match Path::new(containing_file).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Lexically normalize a path: fold `.` away and collapse `..` into its
/// parent without touching the filesystem.
///
/// Leading `..` components (and `..` at a root) are kept; symlinks are
/// deliberately not resolved so workspace-prefix checks compare the same
/// spelling the compiler uses.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
