//! `rntsc version` command implementation.

use rntsc_core::version::version_string;

/// Print version information.
pub fn run() {
    println!("{}", version_string());
}
