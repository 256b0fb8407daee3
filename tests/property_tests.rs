//! Property-based tests for the scoring components
//!
//! Uses proptest to check encoding, alignment, aggregation, masking and
//! reporting over generated inputs.

use ferro_splice::annotation::Strand;
use ferro_splice::score::{aggregate, align, apply_mask, encode, GeneReport, GeneScores, ReportMode, ScoreVector};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

fn dna(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')], 1..max_len)
        .prop_map(|bases| bases.into_iter().collect())
}

fn score() -> impl Strategy<Value = f32> {
    -1.0f32..1.0f32
}

/// A distance and a vector of 2d + 1 scores
fn scored_window() -> impl Strategy<Value = (usize, Vec<f32>)> {
    (1usize..20).prop_flat_map(|d| (Just(d), proptest::collection::vec(score(), 2 * d + 1)))
}

fn reverse_complement(seq: &str) -> String {
    seq.chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'C' => 'G',
            'G' => 'C',
            'T' => 'A',
            other => other,
        })
        .collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_plus_encoding_decodes_to_input(seq in dna(200)) {
        prop_assert_eq!(encode(&seq, Strand::Plus).to_bases(), seq);
    }

    #[test]
    fn prop_minus_encoding_is_reverse_complement(seq in dna(200)) {
        let minus = encode(&seq, Strand::Minus);
        let plus_rc = encode(&reverse_complement(&seq), Strand::Plus);
        prop_assert_eq!(minus.as_array(), plus_rc.as_array());
    }

    #[test]
    fn prop_lowercase_encodes_like_uppercase(seq in dna(100)) {
        let lower = seq.to_ascii_lowercase();
        let lower_enc = encode(&lower, Strand::Plus);
        let seq_enc = encode(&seq, Strand::Plus);
        prop_assert_eq!(
            lower_enc.as_array(),
            seq_enc.as_array()
        );
    }

    #[test]
    fn prop_align_equalizes_lengths(
        (d, base) in scored_window(),
        extra in proptest::collection::vec(score(), 0..10),
        deletion in any::<bool>(),
    ) {
        let mut longer = base.clone();
        longer.extend(&extra);
        let (reference, alternate) = if deletion { (longer, base) } else { (base, longer) };
        let (ref_len, alt_len) = (reference.len(), alternate.len());

        let (r, a) = align(reference.clone(), alternate.clone(), d);
        prop_assert_eq!(r.len(), a.len());
        prop_assert_eq!(r.len(), ref_len.max(alt_len));
        if ref_len == alt_len {
            prop_assert_eq!(r, reference);
            prop_assert_eq!(a, alternate);
        }
    }

    #[test]
    fn prop_single_member_loss_equals_gain(
        (_, reference) in scored_window(),
        seed in any::<u64>(),
    ) {
        let alternate: Vec<f32> = reference
            .iter()
            .enumerate()
            .map(|(i, v)| v + ((seed >> (i % 64)) & 1) as f32 * 0.5)
            .collect();
        let delta: Vec<f32> = alternate.iter().zip(&reference).map(|(a, r)| a - r).collect();

        let scores = aggregate(&[reference], &[alternate]);
        prop_assert_eq!(&scores.loss, &delta);
        prop_assert_eq!(&scores.gain, &delta);
    }

    #[test]
    fn prop_mask_is_idempotent(
        (d, loss) in scored_window(),
        gain_seed in proptest::collection::vec(score(), 41),
        boundaries in proptest::collection::vec(80u64..120, 0..6),
        length_delta in -3isize..4,
    ) {
        let gain = gain_seed[..loss.len()].to_vec();
        let mut once = ScoreVector { loss, gain };
        apply_mask(&mut once, &boundaries, 100, d, length_delta);
        let mut twice = once.clone();
        apply_mask(&mut twice, &boundaries, 100, d, length_delta);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_top_hit_reports_extremes((d, loss) in scored_window(), shift in score()) {
        let gain: Vec<f32> = loss.iter().map(|v| v + shift).collect();
        let scores = ScoreVector { loss, gain };
        let report = GeneReport::new("G", Strand::Plus, &scores, d, ReportMode::TopHit);

        match report.scores {
            GeneScores::TopHit { gain, gain_offset, loss, loss_offset } => {
                let max = scores.gain.iter().cloned().fold(f32::MIN, f32::max);
                let min = scores.loss.iter().cloned().fold(f32::MAX, f32::min);
                prop_assert_eq!(gain, max);
                prop_assert_eq!(loss, min);
                prop_assert!((-(d as i64)..=d as i64).contains(&gain_offset));
                prop_assert!((-(d as i64)..=d as i64).contains(&loss_offset));
            }
            other => prop_assert!(false, "unexpected scores {:?}", other),
        }
    }

    #[test]
    fn prop_threshold_reports_only_large_values(
        (d, loss) in scored_window(),
        cutoff in 0.05f32..1.0,
    ) {
        let gain: Vec<f32> = loss.iter().map(|v| -v).collect();
        let scores = ScoreVector { loss, gain };
        let report = GeneReport::new("G", Strand::Plus, &scores, d, ReportMode::Threshold(cutoff));

        match report.scores {
            GeneScores::Threshold { gains, losses } => {
                prop_assert!(gains.iter().all(|&(v, _)| v >= cutoff));
                prop_assert!(losses.iter().all(|&(v, _)| v <= -cutoff));
                let expected = scores.gain.iter().filter(|&&v| v >= cutoff).count();
                prop_assert_eq!(gains.len(), expected);
            }
            other => prop_assert!(false, "unexpected scores {:?}", other),
        }
    }
}
