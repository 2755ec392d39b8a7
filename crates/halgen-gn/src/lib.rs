//! BUILD.gn generation for hardware abstraction layer trees.
//!
//! Produces one GN `static_library` declaration for a (chip, board) target:
//! a license header, board imports, one `sources` block per scanned root and
//! the chip's include directories. Source files are picked up by walking each
//! root and dropping anything that names a different chip of the family.

pub mod emit;
pub mod error;
pub mod generator;
pub mod plan;
pub mod scan;

pub use error::{GenError, Result};
pub use generator::{Generator, Stage};
pub use plan::{BuildPlan, BuildSummary, Declaration, SourceRoot};
pub use scan::{scan_root, RootReport, DEFAULT_PATTERN};
