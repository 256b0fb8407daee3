//! Strand-aware one-hot sequence encoding
//!
//! Bases map to codes A=1, C=2, G=3, T=4 and anything else to 0, then to
//! rows of a one-hot table whose row 0 is all zero. Minus-strand encoding
//! reverses the sequence and complements each code with `(5 - c) % 5`.

use ndarray::Array2;

use crate::annotation::Strand;

/// One-hot rows indexed by base code
const ONE_HOT: [[f32; 4]; 5] = [
    [0.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

const CODE_TO_BASE: [char; 5] = ['N', 'A', 'C', 'G', 'T'];

/// Numeric code of a base; case-insensitive, unknown bases are 0
pub fn base_code(base: u8) -> u8 {
    match base.to_ascii_uppercase() {
        b'A' => 1,
        b'C' => 2,
        b'G' => 3,
        b'T' => 4,
        _ => 0,
    }
}

/// A `(length, 4)` one-hot matrix over A, C, G, T
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSequence {
    array: Array2<f32>,
}

impl EncodedSequence {
    /// Build the one-hot matrix from base codes
    pub fn from_codes(codes: &[u8]) -> Self {
        let mut array = Array2::zeros((codes.len(), 4));
        for (mut row, &code) in array.rows_mut().into_iter().zip(codes) {
            let one_hot = ONE_HOT.get(code as usize).unwrap_or(&ONE_HOT[0]);
            row.iter_mut().zip(one_hot).for_each(|(dst, &v)| *dst = v);
        }
        Self { array }
    }

    pub fn len(&self) -> usize {
        self.array.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.array.nrows() == 0
    }

    pub fn as_array(&self) -> &Array2<f32> {
        &self.array
    }

    /// Base code of each row (0 for all-zero rows)
    pub fn codes(&self) -> Vec<u8> {
        self.array
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .position(|&v| v != 0.0)
                    .map_or(0, |idx| idx as u8 + 1)
            })
            .collect()
    }

    /// Decode back to bases in encoded order, with `N` for zero rows
    pub fn to_bases(&self) -> String {
        self.codes()
            .into_iter()
            .map(|c| CODE_TO_BASE[c as usize])
            .collect()
    }
}

/// Encode `sequence` as seen from `strand`
pub fn encode(sequence: &str, strand: Strand) -> EncodedSequence {
    let bytes = sequence.as_bytes();
    let codes: Vec<u8> = match strand {
        Strand::Plus => bytes.iter().map(|&b| base_code(b)).collect(),
        Strand::Minus => bytes.iter().rev().map(|&b| (5 - base_code(b)) % 5).collect(),
    };
    EncodedSequence::from_codes(&codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_plus_strand_rows() {
        let encoded = encode("ACGTN", Strand::Plus);
        assert_eq!(encoded.as_array().shape(), &[5, 4]);
        assert_eq!(encoded.as_array().row(0).to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(encoded.as_array().row(3).to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(encoded.as_array().row(4).to_vec(), vec![0.0; 4]);
    }

    #[rstest]
    #[case("ACGT", "ACGT")]
    #[case("acgtn", "ACGTN")]
    #[case("AXRY", "ANNN")]
    #[case("", "")]
    fn test_plus_round_trip(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode(input, Strand::Plus).to_bases(), expected);
    }

    #[rstest]
    #[case("ACGT", "ACGT")]
    #[case("AACG", "CGTT")]
    #[case("GANT", "ANTC")]
    fn test_minus_is_reverse_complement(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode(input, Strand::Minus).to_bases(), expected);
    }

    #[test]
    fn test_codes() {
        assert_eq!(encode("TGCAN", Strand::Plus).codes(), vec![4, 3, 2, 1, 0]);
        assert_eq!(base_code(b'g'), 3);
        assert_eq!(base_code(b'-'), 0);
    }
}
