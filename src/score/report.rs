//! Per-gene score reports
//!
//! A gene record is `gene|<values>|<offsets>|`, and the records of all
//! genes are concatenated with the outer separators trimmed:
//!
//! - top-hit: `gene|gain|loss|gain_offset|loss_offset|`
//! - threshold: `gene|gain_1|...|gain_n|loss_1|...|loss_m|gain_1_pos|...|loss_m_pos|`

use std::fmt;

use crate::annotation::Strand;
use crate::score::aggregate::ScoreVector;

/// How scores are selected for a gene
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReportMode {
    /// Largest gain and largest loss only
    #[default]
    TopHit,
    /// Every site whose gain or loss magnitude reaches the cutoff
    Threshold(f32),
}

impl ReportMode {
    pub fn from_cutoff(cutoff: Option<f32>) -> Self {
        cutoff.map_or(ReportMode::TopHit, ReportMode::Threshold)
    }
}

/// Scores selected for one gene, with offsets relative to the variant
#[derive(Debug, Clone, PartialEq)]
pub enum GeneScores {
    TopHit {
        gain: f32,
        gain_offset: i64,
        loss: f32,
        loss_offset: i64,
    },
    Threshold {
        gains: Vec<(f32, i64)>,
        losses: Vec<(f32, i64)>,
    },
}

/// Report for one gene
#[derive(Debug, Clone, PartialEq)]
pub struct GeneReport {
    pub gene: String,
    pub strand: Strand,
    pub scores: GeneScores,
}

impl GeneReport {
    /// Select scores for `gene` from a non-empty score vector
    pub fn new(gene: impl Into<String>, strand: Strand, scores: &ScoreVector, d: usize, mode: ReportMode) -> Self {
        let offset = |i: usize| i as i64 - d as i64;

        let scores = match mode {
            ReportMode::TopHit => {
                let g = first_index_by(&scores.gain, |a, b| a > b);
                let l = first_index_by(&scores.loss, |a, b| a < b);
                GeneScores::TopHit {
                    gain: scores.gain[g],
                    gain_offset: offset(g),
                    loss: scores.loss[l],
                    loss_offset: offset(l),
                }
            }
            ReportMode::Threshold(cutoff) => GeneScores::Threshold {
                gains: scores
                    .gain
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v >= cutoff)
                    .map(|(i, &v)| (v, offset(i)))
                    .collect(),
                losses: scores
                    .loss
                    .iter()
                    .enumerate()
                    .filter(|&(_, &v)| v <= -cutoff)
                    .map(|(i, &v)| (v, offset(i)))
                    .collect(),
            },
        };

        Self {
            gene: gene.into(),
            strand,
            scores,
        }
    }

    /// The record for this gene, including its trailing separator
    pub fn record(&self) -> String {
        let mut fields = vec![self.gene.clone()];
        match &self.scores {
            GeneScores::TopHit {
                gain,
                gain_offset,
                loss,
                loss_offset,
            } => {
                fields.push(format_score(*gain));
                fields.push(format_score(*loss));
                fields.push(gain_offset.to_string());
                fields.push(loss_offset.to_string());
            }
            GeneScores::Threshold { gains, losses } => {
                fields.extend(gains.iter().chain(losses).map(|(v, _)| format_score(*v)));
                fields.extend(gains.iter().chain(losses).map(|(_, o)| o.to_string()));
            }
        }
        fields.push(String::new());
        fields.join("|")
    }
}

/// Index of the first element preferred by `better` over all before it
fn first_index_by(values: &[f32], better: impl Fn(f32, f32) -> bool) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if better(v, values[best]) {
            best = i;
        }
    }
    best
}

/// Round half-to-even to two decimals, keeping at least one fractional digit
pub fn format_score(value: f32) -> String {
    let rounded = (f64::from(value) * 100.0).round_ties_even() / 100.0;
    // Avoid printing "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:?}", rounded)
}

/// Scores of every gene overlapping a variant
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreReport {
    pub genes: Vec<GeneReport>,
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: String = self.genes.iter().map(GeneReport::record).collect();
        f.write_str(joined.trim_matches('|'))
    }
}
