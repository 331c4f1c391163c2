//! `react-native` package-name substitution.
//!
//! Out-of-tree platforms ship the React-Native implementation under their
//! own package name; imports in shared code still say `react-native`. The
//! resolver rewrites the package head so the platform package is the one
//! that gets located.

use crate::error::Error;
use crate::resolver::trace::TraceLog;

/// Platforms whose React-Native implementation lives out of tree.
/// Platforms not listed here (ios, android, custom targets) keep the
/// `react-native` name unchanged.
const PLATFORM_PACKAGES: &[(&str, &str)] = &[
    ("windows", "react-native-windows"),
    ("macos", "react-native-macos"),
    ("win32", "@office-iss/react-native-win32"),
];

const REACT_NATIVE: &str = "react-native";

/// Rewrite a leading `react-native` reference to the platform package.
///
/// Returns the specifier unchanged when substitution is disabled, the
/// platform has no out-of-tree package, or the specifier does not start
/// with the exact `react-native` token.
pub fn substitute(
    spec: &str,
    platform: &str,
    disabled: bool,
    trace: &mut TraceLog,
) -> Result<String, Error> {
    if disabled {
        return Ok(spec.to_string());
    }
    let Some(&(_, replacement)) = PLATFORM_PACKAGES.iter().find(|(p, _)| *p == platform) else {
        return Ok(spec.to_string());
    };

    let remainder = match spec.strip_prefix(REACT_NATIVE) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => rest,
        _ => return Ok(spec.to_string()),
    };

    let substituted = format!("{replacement}{remainder}");
    trace.log(format!(
        "Substituting module '{spec}' with '{substituted}'."
    ))?;
    Ok(substituted)
}
