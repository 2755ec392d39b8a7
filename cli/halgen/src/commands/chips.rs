//! `halgen chips` and `halgen check` — chip family listing and filter queries.

use anyhow::Result;
use halgen_chips::{ChipFilter, ChipSet};

/// List the known chips.
pub fn list(chips: &ChipSet, current: &str) -> Result<()> {
    println!("Known chips:");
    println!();
    for chip in chips.iter() {
        let marker = if chip == current { "*" } else { " " };
        println!("  {marker} {chip:<12} (matches {} and {})", chip, chip.to_uppercase());
    }
    println!();
    println!("Use 'halgen check <path> --chip <name>' to test a source path.");
    Ok(())
}

/// Outcome of checking one path against a chip.
#[derive(Debug, PartialEq, Eq)]
pub enum Verdict<'a> {
    Kept,
    Excluded { by: &'a str },
}

pub fn verdict<'a>(chips: &'a ChipSet, chip: &'a str, path: &str) -> Verdict<'a> {
    match ChipFilter::for_chip(chips, chip).excluded_by(path) {
        Some(by) => Verdict::Excluded { by },
        None => Verdict::Kept,
    }
}

/// Report whether `path` would be listed when generating for `chip`.
pub fn check(chips: &ChipSet, chip: &str, path: &str) -> Result<()> {
    match verdict(chips, chip, path) {
        Verdict::Kept => println!("kept: {path} (chip {chip})"),
        Verdict::Excluded { by } => {
            println!("excluded: {path} (mentions {by}, generating for {chip})")
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts_follow_filter() {
        let chips = ChipSet::rockchip();
        assert_eq!(verdict(&chips, "rk2206", "./driver/foo.c"), Verdict::Kept);
        assert_eq!(
            verdict(&chips, "rk2206", "./driver/foo_rk3568.c"),
            Verdict::Excluded { by: "rk3568" }
        );
        assert_eq!(
            verdict(&chips, "Swallow", "drivers/SWALLOW/init.c"),
            Verdict::Excluded { by: "swallow" }
        );
    }

    #[test]
    fn list_and_check_succeed() {
        let chips = ChipSet::rockchip();
        assert!(list(&chips, "rk2206").is_ok());
        assert!(check(&chips, "rk2206", "./lib/bsp/RK2206/hal_bsp.c").is_ok());
    }
}
