//! # Order Crossover (OX)
//!
//! Permutation-preserving crossover over tour interiors. The child takes the
//! `[cut1, cut2)` slice of the first parent verbatim at the same positions,
//! then fills the remaining positions starting right after `cut2` (wrapping
//! around) with the second parent's values in their original order, skipping
//! any value already placed. The child is a valid permutation by
//! construction; that is the invariant this operator must never violate.

use crate::error::{Result, TspError};
use crate::rng::RandomNumberGenerator;

/// Crosses two parent interiors with explicit cut points `0 <= cut1 < cut2 <= len`.
///
/// Returns a child interior of the same length. Interiors shorter than 2
/// degenerate to a copy of the first parent.
///
/// # Errors
///
/// Returns [`TspError::Configuration`] if the parents differ in length or
/// the cut points are out of order or out of range.
pub fn order_crossover(
    parent1: &[usize],
    parent2: &[usize],
    cut1: usize,
    cut2: usize,
) -> Result<Vec<usize>> {
    let len = parent1.len();
    if parent2.len() != len {
        return Err(TspError::Configuration(format!(
            "parent interiors differ in length: {} vs {}",
            len,
            parent2.len()
        )));
    }
    if len < 2 {
        return Ok(parent1.to_vec());
    }
    if cut1 >= cut2 || cut2 > len {
        return Err(TspError::Configuration(format!(
            "cut points ({}, {}) must satisfy 0 <= cut1 < cut2 <= {}",
            cut1, cut2, len
        )));
    }

    let mut child = vec![0usize; len];
    // Interior values are 1..=len for an (len + 1)-point instance.
    let mut placed = vec![false; len + 1];

    child[cut1..cut2].copy_from_slice(&parent1[cut1..cut2]);
    for &value in &parent1[cut1..cut2] {
        placed[value] = true;
    }

    // Walk parent 2 starting right after the slice, wrapping, and drop its
    // values into the open child positions in the same rotated order.
    let mut write = cut2 % len;
    for offset in 0..len {
        let value = parent2[(cut2 + offset) % len];
        if placed[value] {
            continue;
        }
        while (cut1..cut2).contains(&write) {
            write = (write + 1) % len;
        }
        child[write] = value;
        placed[value] = true;
        write = (write + 1) % len;
    }

    Ok(child)
}

/// Crosses two parent interiors at uniformly random cut points.
///
/// # Errors
///
/// Returns [`TspError::Configuration`] if the parents differ in length.
pub fn order_crossover_random(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<usize>> {
    let len = parent1.len();
    if len < 2 {
        if parent2.len() != len {
            return Err(TspError::Configuration(format!(
                "parent interiors differ in length: {} vs {}",
                len,
                parent2.len()
            )));
        }
        return Ok(parent1.to_vec());
    }

    let a = rng.gen_index(len + 1);
    let b = rng.gen_index(len + 1);
    let (cut1, cut2) = if a <= b { (a, b) } else { (b, a) };
    if cut1 == cut2 {
        // A zero-width slice degenerates to a rotation of parent 2; treat it
        // as a copy of parent 1 instead, matching the short-interior case.
        return Ok(parent1.to_vec());
    }
    order_crossover(parent1, parent2, cut1, cut2)
}
