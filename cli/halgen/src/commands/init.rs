//! `halgen init` — write a starter manifest.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{HalgenManifest, MANIFEST_NAME};

/// Write `halgen.toml` into `dir`, refusing to overwrite an existing one.
pub fn run(dir: &Path) -> Result<()> {
    let path = dir.join(MANIFEST_NAME);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::write(&path, HalgenManifest::template())
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
