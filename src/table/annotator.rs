//! CSV table annotation

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Writer};
use log::{debug, info};

use crate::annotation::AnnotationProvider;
use crate::batch::{BatchProcessor, BatchStats};
use crate::cli::{open_input, strip_bom};
use crate::error::SpliceError;
use crate::reference::SequenceProvider;
use crate::score::{Variant, VariantOutcome};
use crate::table::columns::{ColumnIds, ColumnIndices};

/// Name of the column appended to annotated tables
pub const SCORE_COLUMN: &str = "SpliceScore";

/// Appends a splice score column to CSV variant tables
///
/// Record numbers in diagnostics are 1-based data row indices.
#[derive(Debug, Clone, Default)]
pub struct TableAnnotator {
    columns: ColumnIds,
}

impl TableAnnotator {
    pub fn new(columns: ColumnIds) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &ColumnIds {
        &self.columns
    }

    /// Annotate a (possibly gzipped) CSV file into `output`
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

    /// Annotate CSV text from `reader` into `writer`
    ///
    /// # Errors
    ///
    /// A missing variant column is a configuration error; an unparseable
    /// position is a parse error for that row.
    pub fn annotate<R, W, S, A>(
        &self,
        reader: R,
        writer: W,
        processor: &BatchProcessor<'_, '_, S, A>,
    ) -> Result<BatchStats, SpliceError>
    where
        R: Read,
        W: Write,
        S: SequenceProvider + Sync + ?Sized,
        A: AnnotationProvider + Sync + ?Sized,
    {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut csv_writer = Writer::from_writer(writer);

        let mut headers = csv_reader.headers()?.clone();
        // A leading BOM sticks to the first header name
        if let Some(first) = headers.get(0).filter(|h| h.starts_with('\u{feff}')) {
            let mut cleaned = StringRecord::new();
            cleaned.push_field(strip_bom(first));
            cleaned.extend(headers.iter().skip(1));
            headers = cleaned;
        }
        let indices = self.columns.resolve(&headers)?;

        let mut out_headers = headers.clone();
        out_headers.push_field(SCORE_COLUMN);
        csv_writer.write_record(&out_headers)?;

        let chunk_size = processor.config().chunk_size;
        let mut stats = BatchStats::new();
        let mut pending: Vec<(usize, StringRecord)> = Vec::with_capacity(chunk_size);

        for (idx, row) in csv_reader.records().enumerate() {
            pending.push((idx + 1, row?));
            if pending.len() >= chunk_size {
                flush(&mut pending, &indices, &mut csv_writer, processor, &mut stats)?;
            }
        }
        flush(&mut pending, &indices, &mut csv_writer, processor, &mut stats)?;

        csv_writer.flush()?;
        Ok(stats)
    }
}

fn row_variant(row: &StringRecord, record: usize, indices: &ColumnIndices) -> Result<Variant, SpliceError> {
    let field = |i: usize| row.get(i).unwrap_or_default().trim();
    let pos = field(indices.pos).parse::<u64>().map_err(|_| {
        SpliceError::parse(
            record,
            format!("row {}: position '{}' is not an integer", record, field(indices.pos)),
        )
    })?;
    Ok(Variant::new(
        field(indices.chrom),
        pos,
        field(indices.reference),
        field(indices.alternate),
    ))
}

fn flush<W, S, A>(
    pending: &mut Vec<(usize, StringRecord)>,
    indices: &ColumnIndices,
    writer: &mut Writer<W>,
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

    let variants = pending
        .iter()
        .map(|(record, row)| Ok((*record, row_variant(row, *record, indices)?)))
        .collect::<Result<Vec<_>, SpliceError>>()?;
    let outcomes = processor.score_chunk(&variants)?;
    debug!("Scored {} table rows", outcomes.len());

    for ((_, mut row), outcome) in pending.drain(..).zip(outcomes) {
        stats.record(&outcome);
        match &outcome {
            VariantOutcome::Scored(report) => row.push_field(&report.to_string()),
            VariantOutcome::Skipped(_) => row.push_field(""),
        }
        writer.write_record(&row)?;
    }
    Ok(())
}
