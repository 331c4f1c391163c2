//! Layered file search: explicit-extension fast path, then the
//! platform × extension cross-product, then the directory-`index`
//! fallback.

use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::resolver::extensions::Extension;
use crate::resolver::probe;
use crate::resolver::trace::TraceLog;

/// A module the compiler can consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    pub absolute_path: PathBuf,
    pub extension: Extension,
}

/// Search `search_dir` for the file backing `module_path`.
///
/// Probe order is the observable contract: the platform suffix is the outer
/// loop, so any platform-specific file beats any generic one; within one
/// platform tier the allowed extensions are probed in the order given.
pub fn find_module_file(
    search_dir: &Path,
    module_path: &str,
    allowed: &[Extension],
    platform_extensions: &[String],
    trace: &mut TraceLog,
) -> Result<Option<ResolvedModule>, Error> {
    let mut module_path = module_path;

    // A specifier that already carries an allowed extension names one exact
    // file; the broad search is skipped. The exception is .js/.jsx, which
    // sources written for emitted output use to reference .ts/.tsx files:
    // on a miss the search continues with the suffix stripped.
    if let Some(ext) = Extension::of(module_path) {
        if allowed.contains(&ext) {
            let candidate = search_dir.join(module_path);
            if probe::is_file(&candidate, trace)? {
                return Ok(Some(ResolvedModule {
                    absolute_path: candidate,
                    extension: ext,
                }));
            }
            if !matches!(ext, Extension::Js | Extension::Jsx) {
                return Ok(None);
            }
            module_path = &module_path[..module_path.len() - ext.as_str().len()];
        }
    }

    for platform_ext in platform_extensions {
        for ext in allowed {
            let candidate = search_dir.join(format!("{module_path}{platform_ext}{ext}"));
            if probe::is_file(&candidate, trace)? {
                return Ok(Some(ResolvedModule {
                    absolute_path: candidate,
                    extension: *ext,
                }));
            }
        }
    }

    let dir = search_dir.join(module_path);
    if probe::is_directory(&dir, trace)? {
        return find_module_file(&dir, "index", allowed, platform_extensions, trace);
    }

    Ok(None)
}
