//! Position-weight-matrix splice model
//!
//! A lightweight backend that scores donor and acceptor motifs with
//! log-odds weight matrices. Each position's output is the larger of the
//! two sigmoid-transformed motif scores.

use std::fs;
use std::path::Path;

use ndarray::aview1;
use serde::{Deserialize, Serialize};

use crate::error::SpliceError;
use crate::model::backend::{PredictionVector, SpliceModel};
use crate::score::EncodedSequence;

/// A weight matrix over A, C, G, T anchored at one of its rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motif {
    /// Row aligned with the scored position
    pub anchor: usize,
    /// One row of A/C/G/T weights per motif position
    pub weights: Vec<[f32; 4]>,
}

impl Motif {
    /// Sum of the weights of the bases covered by the motif centered at `pos`
    ///
    /// Positions falling outside the input contribute nothing.
    fn score_at(&self, input: &EncodedSequence, pos: usize) -> f32 {
        let array = input.as_array();
        let len = array.nrows();
        self.weights
            .iter()
            .enumerate()
            .filter_map(|(k, row)| {
                let idx = (pos + k).checked_sub(self.anchor)?;
                (idx < len).then(|| array.row(idx).dot(&aview1(row)))
            })
            .sum()
    }
}

/// Donor/acceptor weight-matrix model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PwmModel {
    pub context: usize,
    #[serde(default)]
    pub bias: f32,
    pub donor: Motif,
    pub acceptor: Motif,
}

impl PwmModel {
    /// Load a model from JSON
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, SpliceError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SpliceError::Io {
            msg: format!("Failed to read model {}: {}", path.display(), e),
        })?;
        let model: PwmModel = serde_json::from_str(&content)?;
        model.validate().map_err(|msg| SpliceError::InvalidEnsemble {
            msg: format!("{}: {}", path.display(), msg),
        })?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), String> {
        for (name, motif) in [("donor", &self.donor), ("acceptor", &self.acceptor)] {
            if motif.weights.is_empty() {
                return Err(format!("{} motif has no weights", name));
            }
            if motif.anchor >= motif.weights.len() {
                return Err(format!(
                    "{} anchor {} outside a motif of length {}",
                    name,
                    motif.anchor,
                    motif.weights.len()
                ));
            }
        }
        Ok(())
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

impl SpliceModel for PwmModel {
    fn context(&self) -> usize {
        self.context
    }

    fn predict(&self, input: &EncodedSequence) -> Result<PredictionVector, SpliceError> {
        let len = input.len();
        if len < 2 * self.context {
            return Err(SpliceError::model(format!(
                "input of length {} is shorter than twice the context {}",
                len, self.context
            )));
        }

        Ok((self.context..len - self.context)
            .map(|pos| {
                let donor = sigmoid(self.bias + self.donor.score_at(input, pos));
                let acceptor = sigmoid(self.bias + self.acceptor.score_at(input, pos));
                donor.max(acceptor)
            })
            .collect())
    }
}
