//! Reference/alternate window construction
//!
//! The reference window covers `context + d` bases on each side of the
//! reference allele. The alternate window is the same sequence with the
//! reference allele replaced by the alternate allele, so both windows
//! share their flanks but differ in length for indels.

use log::debug;

use crate::error::SkipReason;
use crate::reference::SequenceProvider;
use crate::score::variant::Variant;

/// A window of genomic sequence around a variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceWindow {
    sequence: String,
    /// Bases before the allele (and after it)
    flank: usize,
    /// 1-based variant position the window is centered on
    anchor: u64,
}

impl SequenceWindow {
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn flank(&self) -> usize {
        self.flank
    }

    pub fn anchor(&self) -> u64 {
        self.anchor
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Allele bases between the two flanks
    pub fn allele(&self) -> &str {
        &self.sequence[self.flank..self.sequence.len() - self.flank]
    }
}

/// Matched windows for one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowPair {
    pub reference: SequenceWindow,
    pub alternate: SequenceWindow,
}

impl WindowPair {
    /// `len(alt) - len(ref)`
    pub fn length_delta(&self) -> isize {
        self.alternate.len() as isize - self.reference.len() as isize
    }
}

/// Builds windows for a scoring distance and model context
#[derive(Debug, Clone, Copy)]
pub struct WindowBuilder {
    distance: usize,
    context: usize,
}

impl WindowBuilder {
    pub fn new(distance: usize, context: usize) -> Self {
        Self { distance, context }
    }

    /// Bases on each side of the reference allele
    pub fn flank(&self) -> usize {
        self.context + self.distance
    }

    /// Checks that need no sequence: allele content and deletion size
    pub fn check(&self, variant: &Variant) -> Result<(), SkipReason> {
        let has_base = |allele: &str| allele.bytes().any(|b| matches!(b, b'A' | b'C' | b'G' | b'T'));

        if !has_base(&variant.reference)
            || !has_base(&variant.alternate)
            || (variant.reference.len() > 1 && variant.alternate.len() > 1)
        {
            return Err(SkipReason::UnsupportedVariantFormat {
                reference: variant.reference.clone(),
                alternate: variant.alternate.clone(),
            });
        }

        if variant.reference.len() > 2 * self.distance {
            return Err(SkipReason::DeletionTooLarge {
                length: variant.reference.len(),
                distance: self.distance,
            });
        }

        Ok(())
    }

    /// Fetch the reference window and derive the alternate window
    pub fn build<S: SequenceProvider + ?Sized>(
        &self,
        variant: &Variant,
        provider: &S,
    ) -> Result<WindowPair, SkipReason> {
        self.check(variant)?;

        let flank = self.flank();
        let ref_len = variant.reference.len();
        if variant.pos <= flank as u64 {
            return Err(SkipReason::SequenceRetrievalFailure {
                msg: format!(
                    "window of {} flanking bases starts before the beginning of {}",
                    flank, variant.chrom
                ),
            });
        }
        let start = variant.pos - flank as u64;
        let end = variant
            .pos
            .checked_add((ref_len + flank) as u64 - 1)
            .ok_or_else(|| SkipReason::SequenceRetrievalFailure {
                msg: format!("window end past position {} overflows", variant.pos),
            })?;
        debug!("Fetching {}:{}-{} for {}", variant.chrom, start, end, variant);

        let sequence = provider.get_sequence(&variant.chrom, start, end)?;
        let expected_len = (end - start + 1) as usize;
        if sequence.len() != expected_len || !sequence.is_ascii() {
            return Err(SkipReason::SequenceRetrievalFailure {
                msg: format!(
                    "expected {} bases for {}:{}-{}, got {}",
                    expected_len,
                    variant.chrom,
                    start,
                    end,
                    sequence.len()
                ),
            });
        }

        let observed = &sequence[flank..flank + ref_len];
        if observed != variant.reference {
            return Err(SkipReason::ReferenceMismatch {
                observed: observed.to_string(),
                expected: variant.reference.clone(),
            });
        }

        let alternate = format!(
            "{}{}{}",
            &sequence[..flank],
            variant.alternate,
            &sequence[flank + ref_len..]
        );

        Ok(WindowPair {
            reference: SequenceWindow {
                sequence,
                flank,
                anchor: variant.pos,
            },
            alternate: SequenceWindow {
                sequence: alternate,
                flank,
                anchor: variant.pos,
            },
        })
    }
}
