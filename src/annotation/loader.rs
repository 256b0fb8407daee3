//! Gene annotation loading
//!
//! Builds a [`GeneDb`] from GTF annotations (plain or gzip-compressed).
//! Only `gene` and `exon` features are used; genes are keyed by `gene_id`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::{debug, info};

use crate::annotation::db::GeneDb;
use crate::annotation::gene::{Exon, Gene, Strand};
use crate::error::SpliceError;

/// Load genes from a GTF file
///
/// Gene bounds come from the `gene` feature when present, otherwise from
/// the union of the gene's exons.
pub fn load_gtf<P: AsRef<Path>>(path: P) -> Result<GeneDb, SpliceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SpliceError::Io {
        msg: format!("Failed to open GTF file {}: {}", path.display(), e),
    })?;

    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz")) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let db = read_gtf(BufReader::new(reader))?;
    info!("Loaded {} genes from {}", db.len(), path.display());
    Ok(db)
}

/// Parse GTF records from any buffered reader
pub fn read_gtf<R: BufRead>(reader: R) -> Result<GeneDb, SpliceError> {
    let mut builders: HashMap<String, GeneBuilder> = HashMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SpliceError::Io {
            msg: format!("Failed to read line: {}", e),
        })?;

        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 9 {
            debug!("Skipping GTF line {} with {} columns", idx + 1, fields.len());
            continue;
        }

        let feature_type = fields[2];
        if feature_type != "gene" && feature_type != "exon" {
            continue;
        }

        let start: u64 = fields[3]
            .parse()
            .map_err(|_| SpliceError::parse(idx + 1, format!("invalid start '{}'", fields[3])))?;
        let end: u64 = fields[4]
            .parse()
            .map_err(|_| SpliceError::parse(idx + 1, format!("invalid end '{}'", fields[4])))?;

        let attrs = parse_gtf_attributes(fields[8]);
        let Some(gene_id) = attrs.get("gene_id").cloned() else {
            continue;
        };

        let builder = builders
            .entry(gene_id.clone())
            .or_insert_with(|| GeneBuilder {
                id: gene_id,
                chrom: fields[0].to_string(),
                strand: Strand::parse(fields[6]),
                span: None,
                exon_min: u64::MAX,
                exon_max: 0,
                exons: Vec::new(),
            });

        match feature_type {
            "gene" => {
                builder.span = Some((start, end));
                builder.strand = Strand::parse(fields[6]);
            }
            _ => {
                builder.exon_min = builder.exon_min.min(start);
                builder.exon_max = builder.exon_max.max(end);
                builder.exons.push(Exon::new(start, end));
            }
        }
    }

    Ok(builders.into_values().filter_map(GeneBuilder::build).collect())
}

/// Parse GTF attribute string
fn parse_gtf_attributes(attr_str: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();

    for part in attr_str.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        // GTF format: key "value"
        let mut iter = part.splitn(2, ' ');
        if let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            let value = value.trim().trim_matches('"').to_string();
            attrs.entry(key.to_string()).or_insert(value);
        }
    }

    attrs
}

/// Accumulates the features of one gene
struct GeneBuilder {
    id: String,
    chrom: String,
    strand: Option<Strand>,
    span: Option<(u64, u64)>,
    exon_min: u64,
    exon_max: u64,
    exons: Vec<Exon>,
}

impl GeneBuilder {
    fn build(mut self) -> Option<Gene> {
        let Some(strand) = self.strand else {
            debug!("Dropping unstranded gene {}", self.id);
            return None;
        };
        let (start, end) = match self.span {
            Some(span) => span,
            None if !self.exons.is_empty() => (self.exon_min, self.exon_max),
            None => return None,
        };

        self.exons.sort_by_key(|e| (e.start, e.end));
        self.exons.dedup();

        Some(Gene {
            id: self.id,
            chrom: self.chrom,
            start,
            end,
            strand,
            exons: self.exons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::provider::AnnotationProvider;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const GTF: &str = "\
#!genome-build GRCh38
chr1\tHAVANA\tgene\t1000\t5000\t.\t+\t.\tgene_id \"G1\"; gene_name \"ONE\";
chr1\tHAVANA\ttranscript\t1000\t5000\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";
chr1\tHAVANA\texon\t1000\t1200\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";
chr1\tHAVANA\texon\t4800\t5000\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T1\";
chr1\tHAVANA\texon\t1000\t1200\t.\t+\t.\tgene_id \"G1\"; transcript_id \"T2\";
chr1\tHAVANA\tCDS\t1100\t1200\t.\t+\t0\tgene_id \"G1\"; transcript_id \"T1\";
chr1\tHAVANA\texon\t3000\t3100\t.\t-\t.\tgene_id \"G2\"; transcript_id \"T3\";
chr1\tHAVANA\texon\t3500\t3600\t.\t-\t.\tgene_id \"G2\"; transcript_id \"T3\";
";

    #[test]
    fn test_read_gtf_genes_and_exons() {
        let db = read_gtf(GTF.as_bytes()).unwrap();
        assert_eq!(db.len(), 2);

        let g1 = db.get("G1").unwrap();
        assert_eq!((g1.start, g1.end), (1000, 5000));
        assert_eq!(g1.strand, Strand::Plus);
        // Duplicate exon from the second transcript is collapsed
        assert_eq!(db.exons_of("G1").unwrap(), vec![(1000, 1200), (4800, 5000)]);
    }

    #[test]
    fn test_gene_bounds_inferred_from_exons() {
        let db = read_gtf(GTF.as_bytes()).unwrap();
        let g2 = db.get("G2").unwrap();
        assert_eq!((g2.start, g2.end), (3000, 3600));
        assert_eq!(g2.strand, Strand::Minus);
    }

    #[test]
    fn test_invalid_coordinate_is_parse_error() {
        let gtf = "chr1\tsrc\texon\tabc\t10\t.\t+\t.\tgene_id \"G\";\n";
        let err = read_gtf(gtf.as_bytes()).unwrap_err();
        assert!(matches!(err, SpliceError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_gtf_attributes(r#"gene_id "G1"; gene_name "ONE"; tag "basic"; tag "x";"#);
        assert_eq!(attrs.get("gene_id").unwrap(), "G1");
        assert_eq!(attrs.get("gene_name").unwrap(), "ONE");
        assert_eq!(attrs.get("tag").unwrap(), "basic");
    }

    #[test]
    fn test_load_gzipped_gtf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genes.gtf.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(GTF.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let db = load_gtf(&path).unwrap();
        assert_eq!(db.len(), 2);

        let upper = dir.path().join("GENES.GTF.GZ");
        std::fs::copy(&path, &upper).unwrap();
        assert_eq!(load_gtf(&upper).unwrap().len(), 2);
    }

    #[test]
    fn test_unstranded_genes_are_dropped() {
        let gtf = "\
chr1\tsrc\tgene\t1\t100\t.\t.\t.\tgene_id \"U\";
chr1\tsrc\texon\t10\t20\t.\t.\t.\tgene_id \"U\";
chr1\tsrc\texon\t200\t300\t.\t?\t.\tgene_id \"Q\";
chr1\tsrc\texon\t400\t500\t.\t-\t.\tgene_id \"S\";
";
        let db = read_gtf(gtf.as_bytes()).unwrap();
        assert_eq!(db.len(), 1);
        assert!(db.get("U").is_none());
        assert!(db.get("Q").is_none());
        assert_eq!(db.get("S").unwrap().strand, Strand::Minus);
    }
}
