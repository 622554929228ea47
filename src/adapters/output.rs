//! Output collaborator: serializes generated instances to stdout or a file.

use crate::error::Result;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes the batch as a 2-space-indented JSON array. Without a path the
/// JSON goes to stdout, untouched by any log formatting.
pub fn write_instances(instances: &[Value], path: Option<&Path>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(instances)?;
    match path {
        Some(path) => {
            fs::write(path, rendered + "\n")?;
            info!("wrote {} instance(s) to {}", instances.len(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
