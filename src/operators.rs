//! Representation-level genetic operators.
//!
//! Free functions over gene slices, used by the built-in genomes in
//! [`crate::genome`] and available to custom genome implementations.
//! Every operator works in place on both parents and never changes the
//! length of its input.
//!
//! # Real-valued
//!
//! - [`uniform_init`]: genes drawn uniformly from `[lower, upper)`
//! - [`normal_mutation`]: `x += x * N(0, 1)` with a per-gene probability
//! - [`blend_crossover`]: per-gene random convex combination of two parents
//!
//! # Bit strings
//!
//! - [`flip_mutation`]: flip each bit with a per-bit probability
//! - [`one_point_crossover`]: exchange tails after a random cut point
//!
//! # Permutations
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`swap_mutation`], [`insert_mutation`], [`invert_mutation`]
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*

use rand::Rng;
use rand_distr::StandardNormal;

/// Maps a rate onto `[0, 1]`; NaN counts as zero.
pub fn probability(rate: f64) -> f64 {
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, 1.0)
    }
}

// ============================================================================
// Real-valued operators
// ============================================================================

/// Draws `n` genes uniformly from `[lower, upper)`.
///
/// # Panics
/// Panics if `lower >= upper`.
pub fn uniform_init<R: Rng>(n: usize, lower: f64, upper: f64, rng: &mut R) -> Vec<f64> {
    assert!(lower < upper, "lower bound must be below upper bound");
    (0..n).map(|_| rng.random_range(lower..upper)).collect()
}

/// Normal mutation scaled by the gene's magnitude.
///
/// Each gene is perturbed with probability `rate` as `x += x * z` where
/// `z ~ N(0, 1)`. Genes equal to zero therefore stay at zero. `rate` goes
/// through [`probability`] first.
pub fn normal_mutation<R: Rng>(genes: &mut [f64], rate: f64, rng: &mut R) {
    let rate = probability(rate);
    for x in genes.iter_mut() {
        if rng.random_bool(rate) {
            let z: f64 = rng.sample(StandardNormal);
            *x += *x * z;
        }
    }
}

/// Uniform blend crossover.
///
/// For every position a weight `p ~ U[0, 1)` is drawn and the parents are
/// replaced by `p·a + (1-p)·b` and `(1-p)·a + p·b`.
///
/// # Panics
/// Panics if the slices differ in length.
pub fn blend_crossover<R: Rng>(a: &mut [f64], b: &mut [f64], rng: &mut R) {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    for (x, y) in a.iter_mut().zip(b.iter_mut()) {
        let p: f64 = rng.random();
        let (ox, oy) = (*x, *y);
        *x = p * ox + (1.0 - p) * oy;
        *y = (1.0 - p) * ox + p * oy;
    }
}

// ============================================================================
// Bit-string operators
// ============================================================================

/// Flips each bit independently with probability `rate`.
pub fn flip_mutation<R: Rng>(bits: &mut [bool], rate: f64, rng: &mut R) {
    let rate = probability(rate);
    for bit in bits.iter_mut() {
        if rng.random_bool(rate) {
            *bit = !*bit;
        }
    }
}

/// One-point crossover: swaps everything from a random cut point onwards.
///
/// # Panics
/// Panics if the slices differ in length.
pub fn one_point_crossover<T, R: Rng>(a: &mut [T], b: &mut [T], rng: &mut R) {
    assert_eq!(a.len(), b.len(), "parents must have equal length");
    let n = a.len();
    if n < 2 {
        return;
    }
    let cut = rng.random_range(1..n);
    a[cut..].swap_with_slice(&mut b[cut..]);
}

// ============================================================================
// Permutation operators
// ============================================================================

/// Order Crossover (OX) applied in place to two permutations of `0..n`.
///
/// 1. Pick a random segment `[start, end]`
/// 2. Each child keeps its own parent's segment
/// 3. The remaining positions are filled with the other parent's elements,
///    in their order starting after the segment, skipping those already
///    present
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_crossover<R: Rng>(a: &mut [usize], b: &mut [usize], rng: &mut R) {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");
    if n < 2 {
        return;
    }

    let (start, end) = random_segment(n, rng);
    let child_a = ox_child(a, b, start, end);
    let child_b = ox_child(b, a, start, end);
    a.copy_from_slice(&child_a);
    b.copy_from_slice(&child_b);
}

/// Builds one OX child: segment from `template`, the rest from `donor`.
fn ox_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut taken = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        taken[template[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for offset in 0..n {
        let val = donor[(end + 1 + offset) % n];
        if !taken[val] {
            child[pos] = val;
            taken[val] = true;
            pos = (pos + 1) % n;
        }
    }

    child
}

/// Exchanges two random positions.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

/// Removes an element and reinserts it at a random position.
pub fn insert_mutation<R: Rng>(perm: &mut Vec<usize>, rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let item = perm.remove(rng.random_range(0..n));
    perm.insert(rng.random_range(0..n), item);
}

/// Reverses a random segment (2-opt move).
pub fn invert_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    perm[start..=end].reverse();
}

/// Random segment `[start, end]` within `0..n`, `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    (a.min(b), a.max(b))
}
