//! Realignment of indel prediction vectors
//!
//! For an indel the reference and alternate predictions differ in length.
//! The shorter one is stretched with zeros just after the variant so both
//! share one coordinate frame: index `i` is offset `i - d` on the
//! reference side of the variant.

/// Bring two prediction vectors to equal length
///
/// Equal-length inputs are returned unchanged. Otherwise the shorter
/// vector keeps its first `d + 1` elements, gains a zero block of the
/// length difference and keeps the remainder.
pub fn align(reference: Vec<f32>, alternate: Vec<f32>, d: usize) -> (Vec<f32>, Vec<f32>) {
    use std::cmp::Ordering;

    match reference.len().cmp(&alternate.len()) {
        Ordering::Equal => (reference, alternate),
        Ordering::Greater => {
            let target = reference.len();
            (reference, pad(&alternate, target, d))
        }
        Ordering::Less => {
            let target = alternate.len();
            (pad(&reference, target, d), alternate)
        }
    }
}

fn pad(shorter: &[f32], target: usize, d: usize) -> Vec<f32> {
    assert!(
        shorter.len() < target,
        "padded vector of length {} is not shorter than {}",
        shorter.len(),
        target
    );
    assert!(
        shorter.len() > 2 * d,
        "padded vector of length {} is shorter than 2d+1 = {}",
        shorter.len(),
        2 * d + 1
    );

    let mut padded = Vec::with_capacity(target);
    padded.extend_from_slice(&shorter[..=d]);
    padded.resize(d + 1 + target - shorter.len(), 0.0);
    padded.extend_from_slice(&shorter[d + 1..]);
    padded
}
