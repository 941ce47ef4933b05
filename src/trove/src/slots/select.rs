//! Roulette-wheel selection over weighted entries

use crate::reference::SlotSymbol;
use rand::Rng;

/// Anything with a relative draw weight
pub trait Weighted {
    fn weight(&self) -> u32;
}

impl Weighted for SlotSymbol {
    fn weight(&self) -> u32 {
        self.weight
    }
}

impl<T> Weighted for (T, u32) {
    fn weight(&self) -> u32 {
        self.1
    }
}

/// Sum of all weights
pub fn total_weight<T: Weighted>(entries: &[T]) -> u64 {
    entries.iter().map(|e| u64::from(e.weight())).sum()
}

/// Draw one entry with probability proportional to its weight.
///
/// The draw range is the actual weight total, so any positive scale works.
/// Zero-weight entries are never returned. Returns `None` when there is
/// nothing to draw (empty slice or all weights zero).
pub fn draw<'a, T: Weighted, R: Rng + ?Sized>(entries: &'a [T], rng: &mut R) -> Option<&'a T> {
    let total = total_weight(entries);
    if total == 0 {
        return None;
    }
    pick(entries, rng.gen_range(0..total))
}

/// Walk the running sum and return the first entry whose cumulative weight
/// exceeds `r`
fn pick<T: Weighted>(entries: &[T], r: u64) -> Option<&T> {
    let mut running = 0u64;
    entries.iter().find(|e| {
        running += u64::from(e.weight());
        running > r
    })
}

/// Chance of drawing the entry at `index`
pub fn probability<T: Weighted>(entries: &[T], index: usize) -> Option<f64> {
    let total = total_weight(entries);
    if total == 0 {
        return None;
    }
    entries
        .get(index)
        .map(|e| f64::from(e.weight()) / total as f64)
}
