//! `halgen.toml` manifest parsing and plan configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use halgen_chips::{ChipSet, Target};
use halgen_gn::{BuildPlan, Declaration, SourceRoot};
use serde::{Deserialize, Serialize};

pub const MANIFEST_NAME: &str = "halgen.toml";

/// The top-level manifest of a hardware tree.
///
/// Every section is optional; an empty manifest describes the RK2206 tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HalgenManifest {
    /// Chip and board to generate for.
    #[serde(default)]
    pub target: Target,
    /// Known chip family.
    #[serde(default)]
    pub chips: Option<ChipsConfig>,
    /// Destination and declaration options.
    #[serde(default)]
    pub output: Option<OutputConfig>,
    /// Source roots in scan order. Empty means the standard layout.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// Chip family section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChipsConfig {
    pub known: ChipSet,
}

/// Output section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination path, relative to the manifest directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Library name.
    #[serde(default)]
    pub module: Option<String>,
    /// Sort directory entries by name.
    #[serde(default)]
    pub sorted: Option<bool>,
}

/// One `[[sources]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: PathBuf,
    /// Append to the list instead of starting it. Defaults to `false` for the
    /// first root and `true` for every later one.
    #[serde(default)]
    pub append: Option<bool>,
    /// File name globs. Defaults to `["*.c"]`.
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
}

impl HalgenManifest {
    /// Search upward from `start_dir` for a `halgen.toml` file, parse and return
    /// it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: HalgenManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing halgen.toml")
    }

    /// The chip family, falling back to the Rockchip set.
    pub fn chip_set(&self) -> ChipSet {
        self.chips
            .as_ref()
            .map(|c| c.known.clone())
            .unwrap_or_default()
    }

    /// Turn the manifest into a build plan.
    pub fn to_plan(&self) -> BuildPlan {
        let mut plan = BuildPlan::for_target(self.target.clone());
        plan.chips = self.chip_set();

        if let Some(output) = &self.output {
            if let Some(path) = &output.path {
                plan.output = path.clone();
            }
            if let Some(module) = &output.module {
                plan.module = module.clone();
            }
            if let Some(sorted) = output.sorted {
                plan.sorted = sorted;
            }
        }

        if !self.sources.is_empty() {
            plan.roots = self
                .sources
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let append = s.append.unwrap_or(i > 0);
                    let declaration = if append {
                        Declaration::Append
                    } else {
                        Declaration::Assign
                    };
                    let root = SourceRoot::new(&s.path, declaration);
                    match &s.patterns {
                        Some(patterns) => root.with_patterns(patterns.iter().cloned()),
                        None => root,
                    }
                })
                .collect();
        }

        plan
    }

    /// Generate the default template for `halgen init`.
    pub fn template() -> String {
        let chips = ChipSet::rockchip()
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            r#"[target]
chip = "rk2206"
board = "TB-RK2206H0-A"

[chips]
known = [{chips}]

[output]
path = "BUILD.gn"
module = "hardware"
sorted = false

[[sources]]
path = "./lib/hal"

[[sources]]
path = "./lib/bsp"

[[sources]]
path = "./lib/CMSIS/Device"

[[sources]]
path = "./driver"

[[sources]]
path = "./lz_hardware"
"#
        )
    }
}
