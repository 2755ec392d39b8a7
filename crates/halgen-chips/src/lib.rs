//! Chip model for the halgen BUILD.gn generator.
//!
//! A generation run targets one chip of a known chip family. Source files are
//! attributed to chips purely by name: a path that mentions some other chip of
//! the family belongs to that chip and is left out of the build.
//!
//! - **Chip set:** the ordered list of chip identifiers the family knows about
//! - **Target:** the (chip, board) pair a run generates for
//! - **Filter:** the substring rule deciding which candidate paths survive

pub mod chip;
pub mod filter;
pub mod validate;

pub use chip::{ChipSet, Target};
pub use filter::ChipFilter;
pub use validate::{validate_target, Severity, ValidationIssue};
