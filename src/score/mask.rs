//! Annotated-site masking
//!
//! Gains at annotated exon boundaries and losses at unannotated positions
//! carry little information, so masking clamps them to zero.

use crate::score::aggregate::ScoreVector;

/// Clamp gain at annotated boundaries to `<= 0` and loss at the mirrored
/// positions to `>= 0`
///
/// `boundaries` are 1-based genomic exon boundaries; `length_delta` is
/// `len(alt) - len(ref)`. Boundaries outside the scored range are ignored.
/// The loss index is mirrored the way negative indexing would: index 0
/// stays 0, any other index `i` becomes `len - i`.
pub fn apply_mask(scores: &mut ScoreVector, boundaries: &[u64], position: u64, d: usize, length_delta: isize) {
    let len = scores.len() as i64;
    let origin = position as i64 - d as i64;

    for &boundary in boundaries {
        let mut index = boundary as i64 - origin;
        if length_delta > 0 && index > d as i64 {
            index += length_delta as i64;
        }
        if !(0..len).contains(&index) {
            continue;
        }

        let index = index as usize;
        scores.gain[index] = scores.gain[index].min(0.0);
        let mirrored = if index == 0 { 0 } else { scores.len() - index };
        scores.loss[mirrored] = scores.loss[mirrored].max(0.0);
    }
}
