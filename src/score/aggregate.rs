//! Loss/gain aggregation across ensemble members

/// Worst loss and best gain per position
///
/// Index 0 is offset `-d` from the variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreVector {
    pub loss: Vec<f32>,
    pub gain: Vec<f32>,
}

impl ScoreVector {
    pub fn len(&self) -> usize {
        self.loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }
}

/// Per-member `alt - ref` deltas reduced to loss (min) and gain (max)
///
/// # Panics
///
/// Panics if the vectors differ in count or length.
pub fn aggregate(reference: &[Vec<f32>], alternate: &[Vec<f32>]) -> ScoreVector {
    assert_eq!(reference.len(), alternate.len(), "member count mismatch");
    let deltas: Vec<Vec<f32>> = reference
        .iter()
        .zip(alternate)
        .map(|(r, a)| {
            assert_eq!(r.len(), a.len(), "prediction length mismatch");
            a.iter().zip(r).map(|(a, r)| a - r).collect()
        })
        .collect();
    reduce(&deltas)
}

/// Position-wise minimum and maximum over equal-length rows
pub fn reduce(rows: &[Vec<f32>]) -> ScoreVector {
    let Some(first) = rows.first() else {
        return ScoreVector::default();
    };

    let mut scores = ScoreVector {
        loss: first.clone(),
        gain: first.clone(),
    };
    for row in &rows[1..] {
        assert_eq!(row.len(), first.len(), "delta length mismatch");
        for (i, &v) in row.iter().enumerate() {
            scores.loss[i] = scores.loss[i].min(v);
            scores.gain[i] = scores.gain[i].max(v);
        }
    }
    scores
}

/// Position-wise mean of equal-length rows
pub fn mean(rows: &[Vec<f32>]) -> Vec<f32> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let mut sum = vec![0.0f32; first.len()];
    for row in rows {
        for (acc, &v) in sum.iter_mut().zip(row) {
            *acc += v;
        }
    }
    let n = rows.len() as f32;
    sum.into_iter().map(|v| v / n).collect()
}
