//! Chip sets and target descriptors.

use serde::{Deserialize, Serialize};

/// Chip identifiers of the Rockchip family, in the order the filter checks them.
///
/// Case variants are separate entries: `Koala` and `koala` name the same
/// part but appear in source trees under both spellings.
const ROCKCHIP_CHIPS: &[&str] = &[
    "Pisces", "Koala", "koala", "Swallow", "swallow", "pisces", "rv1126", "rv1108", "rk2108",
    "rk2106", "rk2206", "rk3568", "rk1808",
];

/// An ordered set of known chip identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChipSet {
    names: Vec<String>,
}

impl ChipSet {
    /// Build a chip set from identifiers, keeping their order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The Rockchip family known to the LiteOS-M hardware tree.
    pub fn rockchip() -> Self {
        Self::new(ROCKCHIP_CHIPS.iter().copied())
    }

    /// Whether `chip` is a member, compared case-sensitively.
    pub fn contains(&self, chip: &str) -> bool {
        self.names.iter().any(|n| n == chip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::rockchip()
    }
}

/// The (chip, board) pair a generation run targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Chip identifier (e.g., "rk2206"). Selects include paths and filters sources.
    pub chip: String,
    /// Board identifier (e.g., "TB-RK2206H0-A"). Carried along, never filtered on.
    pub board: String,
}

impl Target {
    pub fn new(chip: impl Into<String>, board: impl Into<String>) -> Self {
        Self {
            chip: chip.into(),
            board: board.into(),
        }
    }

    /// The RK2206 development board the hardware tree ships for.
    pub fn tb_rk2206h0a() -> Self {
        Self::new("rk2206", "TB-RK2206H0-A")
    }

    /// Chip identifier in upper case, as used by the CMSIS and BSP directories.
    pub fn chip_upper(&self) -> String {
        self.chip.to_uppercase()
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::tb_rk2206h0a()
    }
}
