//! Streaming VCF annotation

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use log::{debug, info};

use crate::annotation::AnnotationProvider;
use crate::batch::{BatchProcessor, BatchStats};
use crate::cli::{open_input, strip_bom};
use crate::error::SpliceError;
use crate::reference::SequenceProvider;
use crate::score::VariantOutcome;
use crate::vcf::header::{declares_info, info_header_line, INFO_KEY};
use crate::vcf::record::VcfRecord;

/// Adds splice scores to the INFO column of VCF records
///
/// Header lines pass through, with the INFO declaration inserted before
/// `#CHROM` unless the input already declares it. Each record is scored
/// on its first ALT allele; skipped records are written unchanged. Record
/// numbers in diagnostics are 1-based line numbers.
#[derive(Debug, Clone)]
pub struct VcfAnnotator {
    key: String,
}

impl Default for VcfAnnotator {
    fn default() -> Self {
        Self {
            key: INFO_KEY.to_string(),
        }
    }
}

impl VcfAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different INFO key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Annotate a (possibly gzipped) VCF file into `output`
    pub fn annotate_file<S, A>(
        &self,
        input: &Path,
        output: &Path,
        processor: &BatchProcessor<'_, '_, S, A>,
    ) -> Result<BatchStats, SpliceError>
    where
        S: SequenceProvider + Sync + ?Sized,
        A: AnnotationProvider + Sync + ?Sized,
    {
        let reader = open_input(input)?;
        let file = File::create(output).map_err(|e| SpliceError::Io {
            msg: format!("Failed to create {}: {}", output.display(), e),
        })?;
        let stats = self.annotate(reader, BufWriter::new(file), processor)?;
        info!("{}: {}", input.display(), stats);
        Ok(stats)
    }

    /// Annotate VCF text from `reader` into `writer`
    pub fn annotate<R, W, S, A>(
        &self,
        reader: R,
        mut writer: W,
        processor: &BatchProcessor<'_, '_, S, A>,
    ) -> Result<BatchStats, SpliceError>
    where
        R: BufRead,
        W: Write,
        S: SequenceProvider + Sync + ?Sized,
        A: AnnotationProvider + Sync + ?Sized,
    {
        let chunk_size = processor.config().chunk_size;
        let mut stats = BatchStats::new();
        let mut pending: Vec<(usize, VcfRecord)> = Vec::with_capacity(chunk_size);
        let mut info_declared = false;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = idx + 1;
            let line = if idx == 0 { strip_bom(&line) } else { line.as_str() };

            if line.starts_with("##") {
                info_declared |= declares_info(line, &self.key);
                writeln!(writer, "{}", line)?;
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }
            if !info_declared {
                writeln!(writer, "{}", info_header_line(&self.key))?;
                info_declared = true;
            }
            if line.starts_with('#') {
                writeln!(writer, "{}", line)?;
                continue;
            }

            pending.push((line_number, VcfRecord::parse(line, line_number)?));
            if pending.len() >= chunk_size {
                self.flush(&mut pending, &mut writer, processor, &mut stats)?;
            }
        }

        self.flush(&mut pending, &mut writer, processor, &mut stats)?;
        writer.flush()?;
        Ok(stats)
    }

    fn flush<W, S, A>(
        &self,
        pending: &mut Vec<(usize, VcfRecord)>,
        writer: &mut W,
        processor: &BatchProcessor<'_, '_, S, A>,
        stats: &mut BatchStats,
    ) -> Result<(), SpliceError>
    where
        W: Write,
        S: SequenceProvider + Sync + ?Sized,
        A: AnnotationProvider + Sync + ?Sized,
    {
        if pending.is_empty() {
            return Ok(());
        }

        let variants: Vec<_> = pending
            .iter()
            .map(|(line, record)| (*line, record.first_variant()))
            .collect();
        let outcomes = processor.score_chunk(&variants)?;
        debug!("Scored {} VCF records", outcomes.len());

        for ((_, mut record), outcome) in pending.drain(..).zip(outcomes) {
            stats.record(&outcome);
            if let VariantOutcome::Scored(report) = &outcome {
                record.set_info(&self.key, &report.to_string());
            }
            writeln!(writer, "{}", record)?;
        }
        Ok(())
    }
}
