//! The BUILD.gn generator.
//!
//! A generator owns its output document for one run and writes it strictly
//! front to back:
//!
//! ```text
//! Created -> HeaderWritten -> SourcesWritten* -> IncludesWritten -> Closed
//! ```
//!
//! Every operation checks the current stage first, so a misordered caller gets
//! [`GenError::OutOfOrder`] rather than a malformed file.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use halgen_chips::{ChipFilter, ChipSet, Target};
use log::debug;

use crate::emit;
use crate::error::{GenError, Result};
use crate::plan::{Declaration, SourceRoot};
use crate::scan::{compile_patterns, scan_root, RootReport};

/// Where a generator is in its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Created,
    HeaderWritten,
    SourcesWritten,
    IncludesWritten,
    Closed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Created => "created",
            Stage::HeaderWritten => "past the header",
            Stage::SourcesWritten => "writing sources",
            Stage::IncludesWritten => "past the include list",
            Stage::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Writes one `static_library` declaration for one target.
pub struct Generator<'a, W: Write> {
    out: W,
    stage: Stage,
    target: &'a Target,
    chips: &'a ChipSet,
    module: String,
    base_dir: PathBuf,
    sorted: bool,
}

impl<'a> Generator<'a, BufWriter<File>> {
    /// Open (creating or truncating) the document at `path`.
    ///
    /// This is the one fatal failure of a run: if the file cannot be opened,
    /// no generator is returned and nothing is written anywhere.
    pub fn begin(path: &Path, target: &'a Target, chips: &'a ChipSet) -> Result<Self> {
        let file = File::create(path).map_err(|source| GenError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file), target, chips))
    }
}

impl<'a, W: Write> Generator<'a, W> {
    /// Generator over an arbitrary writer.
    pub fn new(out: W, target: &'a Target, chips: &'a ChipSet) -> Self {
        Self {
            out,
            stage: Stage::Created,
            target,
            chips,
            module: emit::DEFAULT_MODULE.to_string(),
            base_dir: PathBuf::from("."),
            sorted: false,
        }
    }

    /// Name of the declared library (defaults to `hardware`).
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Directory that relative source roots are read from.
    ///
    /// Emitted paths are unaffected: they keep the root exactly as passed to
    /// [`collect_sources`](Self::collect_sources).
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Order each directory's entries by file name instead of readdir order.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Write the license block, the board imports and the library opening.
    pub fn write_header(&mut self) -> Result<()> {
        self.expect("write the header", &[Stage::Created])?;
        let header = emit::header(self.target, &self.module);
        self.out.write_all(header.as_bytes())?;
        self.stage = Stage::HeaderWritten;
        Ok(())
    }

    /// Scan `root` and write one `sources` block for what survives the chip
    /// filter. The block is written even when it ends up empty.
    pub fn collect_sources(&mut self, root: &SourceRoot) -> Result<RootReport> {
        self.expect(
            "collect sources",
            &[Stage::HeaderWritten, Stage::SourcesWritten],
        )?;

        let patterns = compile_patterns(&root.patterns)?;
        let filter = ChipFilter::new(self.chips, self.target);
        let report = scan_root(&self.base_dir, &root.path, &patterns, &filter, self.sorted)?;

        let block = emit::sources_block(root.declaration, &report.kept);
        self.out.write_all(block.as_bytes())?;
        self.stage = Stage::SourcesWritten;

        debug!(
            "{}: {} sources kept, {} excluded",
            root.path.display(),
            report.kept.len(),
            report.excluded.len()
        );
        Ok(report)
    }

    /// Shorthand for [`collect_sources`](Self::collect_sources) with the
    /// default `*.c` pattern.
    pub fn collect(
        &mut self,
        root: impl Into<PathBuf>,
        declaration: Declaration,
    ) -> Result<RootReport> {
        self.collect_sources(&SourceRoot::new(root, declaration))
    }

    /// Write the `include_dirs` block.
    pub fn write_include_paths(&mut self) -> Result<()> {
        self.expect(
            "write include paths",
            &[Stage::HeaderWritten, Stage::SourcesWritten],
        )?;
        self.out.write_all(emit::include_block(self.target).as_bytes())?;
        self.stage = Stage::IncludesWritten;
        Ok(())
    }

    /// Close the library declaration, flush, and hand the writer back.
    pub fn end(mut self) -> Result<W> {
        self.expect("end the document", &[Stage::IncludesWritten])?;
        self.out.write_all(emit::footer().as_bytes())?;
        self.out.flush()?;
        self.stage = Stage::Closed;
        Ok(self.out)
    }

    fn expect(&self, operation: &'static str, allowed: &[Stage]) -> Result<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(GenError::OutOfOrder {
                operation,
                stage: self.stage,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn render(base: &Path, target: &Target, roots: &[SourceRoot]) -> String {
        let chips = ChipSet::rockchip();
        let mut generator = Generator::new(Vec::new(), target, &chips)
            .base_dir(base)
            .sorted(true);
        generator.write_header().unwrap();
        for root in roots {
            generator.collect_sources(root).unwrap();
        }
        generator.write_include_paths().unwrap();
        String::from_utf8(generator.end().unwrap()).unwrap()
    }

    #[test]
    fn full_document_for_rk2206() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("driver/foo_rk2206.c"));
        touch(&dir.path().join("driver/foo_rk3568.c"));
        touch(&dir.path().join("driver/foo.c"));
        fs::create_dir_all(dir.path().join("lib/hal")).unwrap();

        let text = render(
            dir.path(),
            &Target::tb_rk2206h0a(),
            &SourceRoot::chain(["./lib/hal", "./driver"]),
        );

        assert!(text.contains("static_library(\"hardware\") {\n  sources = [\n  ]\n"));
        assert!(text.contains(
            "  sources += [\n    \"./driver/foo.c\",\n    \"./driver/foo_rk2206.c\",\n  ]\n"
        ));
        assert!(!text.contains("rk3568"));
        assert!(text.ends_with("  ]\n}\n"));
    }

    #[test]
    fn exactly_one_include_block() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            touch(&dir.path().join(format!("driver/file{i}.c")));
        }
        let text = render(
            dir.path(),
            &Target::default(),
            &SourceRoot::chain(["./driver"]),
        );

        assert_eq!(text.matches("include_dirs = [").count(), 1);
        let start = text.find("include_dirs = [").unwrap();
        let entries = text[start..]
            .lines()
            .skip(1)
            .take_while(|l| *l != "  ]")
            .count();
        assert_eq!(entries, 12);
    }

    #[test]
    fn header_only_document_is_closed_after_includes() {
        let chips = ChipSet::rockchip();
        let target = Target::default();
        let mut generator = Generator::new(Vec::new(), &target, &chips);
        generator.write_header().unwrap();
        generator.write_include_paths().unwrap();
        assert_eq!(generator.stage(), Stage::IncludesWritten);
        let text = String::from_utf8(generator.end().unwrap()).unwrap();
        assert!(!text.contains("sources"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn sources_before_header_is_rejected() {
        let chips = ChipSet::rockchip();
        let target = Target::default();
        let mut generator = Generator::new(Vec::new(), &target, &chips);
        let err = generator.collect("./driver", Declaration::Assign).unwrap_err();
        assert!(matches!(
            err,
            GenError::OutOfOrder {
                stage: Stage::Created,
                ..
            }
        ));
    }

    #[test]
    fn sources_after_includes_is_rejected() {
        let chips = ChipSet::rockchip();
        let target = Target::default();
        let mut generator = Generator::new(Vec::new(), &target, &chips);
        generator.write_header().unwrap();
        generator.write_include_paths().unwrap();
        let err = generator.collect("./driver", Declaration::Append).unwrap_err();
        assert!(err.to_string().contains("past the include list"));
    }

    #[test]
    fn end_without_includes_is_rejected() {
        let chips = ChipSet::rockchip();
        let target = Target::default();
        let mut generator = Generator::new(Vec::new(), &target, &chips);
        generator.write_header().unwrap();
        assert!(generator.end().is_err());
    }

    #[test]
    fn header_twice_is_rejected() {
        let chips = ChipSet::rockchip();
        let target = Target::default();
        let mut generator = Generator::new(Vec::new(), &target, &chips);
        generator.write_header().unwrap();
        assert!(generator.write_header().is_err());
    }

    #[test]
    fn custom_module_name() {
        let chips = ChipSet::rockchip();
        let target = Target::default();
        let mut generator = Generator::new(Vec::new(), &target, &chips).module("hal_rk2206");
        generator.write_header().unwrap();
        generator.write_include_paths().unwrap();
        let text = String::from_utf8(generator.end().unwrap()).unwrap();
        assert!(text.contains("static_library(\"hal_rk2206\") {"));
    }

    #[test]
    fn begin_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BUILD.gn");
        fs::write(&path, "stale contents that must disappear\n".repeat(100)).unwrap();

        let chips = ChipSet::rockchip();
        let target = Target::default();
        let mut generator = Generator::begin(&path, &target, &chips).unwrap();
        generator.write_header().unwrap();
        generator.write_include_paths().unwrap();
        generator.end().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.starts_with("# Copyright"));
    }

    #[test]
    fn begin_fails_when_destination_cannot_be_opened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("BUILD.gn");
        let chips = ChipSet::rockchip();
        let target = Target::default();
        let result = Generator::begin(&path, &target, &chips);
        assert!(matches!(result, Err(GenError::Open { .. })));
    }
}
