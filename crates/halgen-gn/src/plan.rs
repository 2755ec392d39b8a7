//! Build plans: the complete configuration of one generation run.

use std::path::{Path, PathBuf};

use halgen_chips::{ChipSet, Target};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::emit::DEFAULT_MODULE;
use crate::error::Result;
use crate::generator::Generator;
use crate::scan::{RootReport, DEFAULT_PATTERN};

/// Whether a `sources` block starts the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Declaration {
    /// `sources = [ ... ]`
    Assign,
    /// `sources += [ ... ]`
    Append,
}

impl Declaration {
    pub fn operator(self) -> &'static str {
        match self {
            Declaration::Assign => "=",
            Declaration::Append => "+=",
        }
    }
}

/// A directory scanned recursively for sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    /// Path as it should appear in the build file.
    pub path: PathBuf,
    pub declaration: Declaration,
    /// File name globs; a file is a candidate if any of them matches.
    pub patterns: Vec<String>,
}

impl SourceRoot {
    pub fn new(path: impl Into<PathBuf>, declaration: Declaration) -> Self {
        Self {
            path: path.into(),
            declaration,
            patterns: vec![DEFAULT_PATTERN.to_string()],
        }
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Roots that build a single list: the first assigns, the rest append.
    pub fn chain<I, P>(paths: I) -> Vec<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        paths
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let declaration = if i == 0 {
                    Declaration::Assign
                } else {
                    Declaration::Append
                };
                Self::new(p, declaration)
            })
            .collect()
    }
}

/// Everything one run needs: target, chip family, roots and destination.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub target: Target,
    pub chips: ChipSet,
    /// Name of the declared `static_library`.
    pub module: String,
    /// Destination, relative to the base directory unless absolute.
    pub output: PathBuf,
    pub roots: Vec<SourceRoot>,
    pub sorted: bool,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Where the document was written, or `None` when rendered in memory.
    pub output: Option<PathBuf>,
    pub roots: Vec<RootReport>,
}

impl BuildSummary {
    pub fn kept(&self) -> usize {
        self.roots.iter().map(|r| r.kept.len()).sum()
    }

    pub fn excluded(&self) -> usize {
        self.roots.iter().map(|r| r.excluded.len()).sum()
    }
}

impl BuildPlan {
    /// The LiteOS-M hardware tree for the RK2206 development board.
    pub fn rk2206() -> Self {
        Self::for_target(Target::tb_rk2206h0a())
    }

    /// The standard hardware tree layout for any target of the Rockchip family.
    pub fn for_target(target: Target) -> Self {
        Self {
            target,
            chips: ChipSet::rockchip(),
            module: DEFAULT_MODULE.to_string(),
            output: PathBuf::from("BUILD.gn"),
            roots: SourceRoot::chain([
                "./lib/hal",
                "./lib/bsp",
                "./lib/CMSIS/Device",
                "./driver",
                "./lz_hardware",
            ]),
            sorted: false,
        }
    }

    /// Generate the document into `base_dir.join(self.output)`.
    pub fn run(&self, base_dir: &Path) -> Result<BuildSummary> {
        let output = base_dir.join(&self.output);
        let generator = Generator::begin(&output, &self.target, &self.chips)?;
        let (_, roots) = self.drive(generator, base_dir)?;
        debug!(
            "wrote {} for {} ({})",
            output.display(),
            self.target.chip,
            self.target.board
        );
        Ok(BuildSummary {
            output: Some(output),
            roots,
        })
    }

    /// Generate the document in memory.
    pub fn render(&self, base_dir: &Path) -> Result<(String, BuildSummary)> {
        let generator = Generator::new(Vec::new(), &self.target, &self.chips);
        let (bytes, roots) = self.drive(generator, base_dir)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok((text, BuildSummary { output: None, roots }))
    }

    fn drive<W: std::io::Write>(
        &self,
        generator: Generator<'_, W>,
        base_dir: &Path,
    ) -> Result<(W, Vec<RootReport>)> {
        let mut generator = generator
            .module(self.module.clone())
            .base_dir(base_dir)
            .sorted(self.sorted);

        generator.write_header()?;
        let mut reports = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            reports.push(generator.collect_sources(root)?);
        }
        generator.write_include_paths()?;
        let out = generator.end()?;
        Ok((out, reports))
    }
}

impl Default for BuildPlan {
    fn default() -> Self {
        Self::rk2206()
    }
}
