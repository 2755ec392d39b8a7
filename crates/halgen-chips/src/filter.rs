//! Chip-name source filtering.
//!
//! A candidate path is attributed to a chip when the chip identifier, or its
//! upper-case spelling, appears anywhere in the path. Matching is a plain
//! case-sensitive substring search: `board_rk2206_extra.c` and
//! `lib/bsp/RK2206/hal_bsp.c` both belong to `rk2206`, and so does any path that
//! happens to contain those characters inside an unrelated word. Existing build
//! trees depend on exactly this behavior.

use crate::chip::{ChipSet, Target};

/// Decides which candidate paths belong to a target chip.
#[derive(Debug, Clone)]
pub struct ChipFilter<'a> {
    chips: &'a ChipSet,
    target: &'a str,
}

impl<'a> ChipFilter<'a> {
    pub fn new(chips: &'a ChipSet, target: &'a Target) -> Self {
        Self::for_chip(chips, &target.chip)
    }

    /// Filter for a bare chip identifier.
    pub fn for_chip(chips: &'a ChipSet, chip: &'a str) -> Self {
        Self {
            chips,
            target: chip,
        }
    }

    /// The first known chip, other than the target, that `path` mentions.
    ///
    /// The target's own identifier never excludes, even when another member
    /// of the set upper-cases to the same spelling.
    pub fn excluded_by(&self, path: &str) -> Option<&'a str> {
        self.chips
            .iter()
            .filter(|&chip| chip != self.target)
            .find(|&chip| path.contains(chip) || path.contains(&chip.to_uppercase()))
    }

    /// Whether `path` survives filtering for the target chip.
    pub fn admits(&self, path: &str) -> bool {
        self.excluded_by(path).is_none()
    }
}
