//! Filesystem probes.
//!
//! Every miss leaves a record in the current trace transaction; the exact
//! phrasing is part of the trace contract and is matched by downstream
//! tooling.

use std::path::Path;

use crate::error::Error;
use crate::resolver::trace::TraceLog;

/// Whether `path` is an existing file. Misses are traced.
pub fn is_file(path: &Path, trace: &mut TraceLog) -> Result<bool, Error> {
    if path.is_file() {
        Ok(true)
    } else {
        trace.log(format!("File {} does not exist.", path.display()))?;
        Ok(false)
    }
}

/// Whether `path` is an existing directory. Misses are traced.
pub fn is_directory(path: &Path, trace: &mut TraceLog) -> Result<bool, Error> {
    if path.is_dir() {
        Ok(true)
    } else {
        trace.log(format!("Directory {} does not exist.", path.display()))?;
        Ok(false)
    }
}
