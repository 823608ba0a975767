//! Weighted random selection over an explicit table.
//!
//! The weather roll (and anything else with a fixed probability table) walks
//! the table in order, accumulating weights, and picks the first entry whose
//! cumulative weight exceeds a uniform [0, 1) draw. Weights must sum to 1.

use rand::Rng;

/// Picks one entry from `table` by cumulative weight.
///
/// Falls back to the last entry if floating-point accumulation leaves the
/// draw above the final cumulative sum.
pub fn weighted_pick<'a, T>(rng: &mut impl Rng, table: &'a [(T, f64)]) -> &'a T {
    debug_assert!(!table.is_empty());
    debug_assert!(
        (table.iter().map(|(_, w)| w).sum::<f64>() - 1.0).abs() < 1e-9,
        "weight table must sum to 1.0"
    );

    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (item, weight) in table {
        cumulative += weight;
        if draw < cumulative {
            return item;
        }
    }
    &table[table.len() - 1].0
}
