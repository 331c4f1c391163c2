//! `rntsc workspaces` command implementation.

use std::path::Path;

use miette::Result;
use rntsc_core::workspace::enumerate_workspaces;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct WorkspaceOutput {
    name: String,
    root: String,
    version: Option<String>,
}

/// List the workspace packages discovered from `cwd`.
pub fn run(cwd: &Path, json: bool) -> Result<()> {
    let workspaces = enumerate_workspaces(cwd);

    if json {
        let output: Vec<WorkspaceOutput> = workspaces
            .iter()
            .map(|w| WorkspaceOutput {
                name: w.name.clone(),
                root: w.root.to_string_lossy().into_owned(),
                version: w.manifest.version.clone(),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("workspace output serializes")
        );
    } else if workspaces.is_empty() {
        println!("no workspaces found");
    } else {
        for workspace in &workspaces {
            println!("{}\t{}", workspace.name, workspace.root.display());
        }
    }

    Ok(())
}
