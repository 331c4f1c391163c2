/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version for the machine-readable (`--json`) output contracts.
/// Bump when an output format changes incompatibly.
pub const SCHEMA_VERSION: u32 = 1;

/// The version line printed by `rntsc version`.
#[must_use]
pub fn version_string() -> String {
    format!("rntsc {VERSION} (schema v{SCHEMA_VERSION})")
}
