//! End-to-end tests for variant scoring

use std::sync::Arc;

use ferro_splice::annotation::{read_gtf, Gene, GeneDb, Strand};
use ferro_splice::error::{ErrorCode, SkipReason};
use ferro_splice::model::{ContextGroup, MockModel, ModelEnsemble, PredictionVector, SharedModel, SpliceModel};
use ferro_splice::score::{align, EncodedSequence, EnsemblePredictor, WindowBuilder};
use ferro_splice::{
    GroupSelection, MockProvider, Reduction, ScoringConfig, SpliceError, Variant, VariantOutcome,
    VariantScorer,
};

const CONTEXT: usize = 10;

/// 100 bases of ACGT repeats: position p holds "ACGT"[(p - 1) % 4]
fn sequences() -> MockProvider {
    MockProvider::new().with_contig("chr1", "ACGT".repeat(25))
}

fn single_model(model: MockModel) -> ModelEnsemble {
    ModelEnsemble::from_models(vec![Arc::new(model) as SharedModel]).unwrap()
}

fn single_model_shared(model: SharedModel) -> ModelEnsemble {
    ModelEnsemble::from_models(vec![model]).unwrap()
}

fn gene(id: &str, start: u64, end: u64, strand: Strand) -> Gene {
    Gene::new(id, "chr1", start, end, strand)
}

fn score(
    genes: &GeneDb,
    ensemble: &ModelEnsemble,
    config: &ScoringConfig,
    variant: &Variant,
) -> VariantOutcome {
    let sequences = sequences();
    let scorer = VariantScorer::new(&sequences, genes, ensemble, config).unwrap();
    scorer.score(1, variant).unwrap()
}

fn report(outcome: &VariantOutcome) -> String {
    outcome.report().expect("variant was skipped").to_string()
}

fn skip_reason(outcome: &VariantOutcome) -> &SkipReason {
    match outcome {
        VariantOutcome::Skipped(skip) => &skip.reason,
        VariantOutcome::Scored(report) => panic!("expected a skip, got {}", report),
    }
}

#[test]
fn test_substitution_scores_top_hit() {
    let variant = Variant::new("chr1", 41, "A", "G");

    // Windows have equal length, so alignment leaves predictions untouched
    let windows = WindowBuilder::new(5, CONTEXT).build(&variant, &sequences()).unwrap();
    assert_eq!(windows.length_delta(), 0);
    assert_eq!(windows.reference.allele(), "A");
    assert_eq!(windows.alternate.allele(), "G");
    let (r, a) = align(vec![0.1; 11], vec![0.2; 11], 5);
    assert_eq!((r.len(), a.len()), (11, 11));

    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus)].into_iter().collect();
    let ensemble = single_model(MockModel::new(CONTEXT).with_base_score(b'G', 0.5));
    let outcome = score(&genes, &ensemble, &ScoringConfig::new().with_distance(5), &variant);
    assert_eq!(report(&outcome), "GENE|0.5|0.0|0|-5");
}

#[test]
fn test_deletion_aligns_to_reference_frame() {
    // Position 121 is 'A' followed by a 'T' at 122
    let mut contig = "ACGT".repeat(60);
    contig.replace_range(121..122, "T");
    let sequences = MockProvider::new().with_contig("chr1", contig);
    let variant = Variant::new("chr1", 121, "AT", "A");
    let ensemble = single_model(MockModel::new(CONTEXT).with_base_score(b'T', 1.0));

    let windows = WindowBuilder::new(50, CONTEXT).build(&variant, &sequences).unwrap();
    assert_eq!(windows.reference.len(), windows.alternate.len() + 1);

    let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::default(), Reduction::PerMember).unwrap();
    let scores = predictor.score(&windows, Strand::Plus, 50).unwrap();
    // Offsets -50..=51
    assert_eq!(scores.len(), 102);
    // The deleted T is the only position that changes
    assert_eq!(scores.loss[51], -1.0);
    assert_eq!(scores.gain[51], -1.0);
    assert!(scores.loss.iter().enumerate().all(|(i, &v)| i == 51 || v == 0.0));
    assert!(scores.gain.iter().enumerate().all(|(i, &v)| i == 51 || v == 0.0));

    let genes: GeneDb = [gene("GENE", 1, 240, Strand::Plus)].into_iter().collect();
    let config = ScoringConfig::new().with_distance(50);
    let scorer = VariantScorer::new(&sequences, &genes, &ensemble, &config).unwrap();
    let outcome = scorer.score(1, &variant).unwrap();
    assert_eq!(report(&outcome), "GENE|0.0|-1.0|-50|1");
}

#[test]
fn test_no_overlapping_gene_skips_before_prediction() {
    let model = Arc::new(MockModel::new(CONTEXT));
    let ensemble = ModelEnsemble::from_models(vec![model.clone() as SharedModel]).unwrap();
    let genes: GeneDb = [gene("FAR", 80, 100, Strand::Minus)].into_iter().collect();

    let outcome = score(&genes, &ensemble, &ScoringConfig::new().with_distance(5), &Variant::new("chr1", 41, "A", "G"));
    assert!(matches!(skip_reason(&outcome), SkipReason::NoOverlappingGene { pos: 41, .. }));
    assert_eq!(model.call_count(), 0);
}

#[test]
fn test_threshold_reports_single_gain() {
    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus)].into_iter().collect();
    let ensemble = single_model(MockModel::new(CONTEXT).with_base_score(b'G', 3.5));
    let config = ScoringConfig::new().with_distance(5).with_score_cutoff(Some(2.0));

    let outcome = score(&genes, &ensemble, &config, &Variant::new("chr1", 41, "A", "G"));
    assert_eq!(report(&outcome), "GENE|3.5|0");
}

#[test]
fn test_genes_on_both_strands() {
    let genes: GeneDb = [
        gene("G1", 1, 100, Strand::Plus),
        gene("G2", 20, 60, Strand::Minus),
    ]
    .into_iter()
    .collect();
    // On the minus strand the alternate G reads as C
    let ensemble = single_model(
        MockModel::new(CONTEXT)
            .with_base_score(b'G', 0.5)
            .with_base_score(b'C', 0.25),
    );

    let outcome = score(&genes, &ensemble, &ScoringConfig::new().with_distance(5), &Variant::new("chr1", 41, "A", "G"));
    assert_eq!(report(&outcome), "G1|0.5|0.0|0|-5|G2|0.25|0.0|0|-5");
}

#[test]
fn test_mask_suppresses_gain_at_annotated_boundary() {
    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus).with_exons([(41, 60)])]
        .into_iter()
        .collect();
    let ensemble = single_model(MockModel::new(CONTEXT).with_base_score(b'G', 0.5));
    let variant = Variant::new("chr1", 41, "A", "G");

    let unmasked = score(&genes, &ensemble, &ScoringConfig::new().with_distance(5), &variant);
    assert_eq!(report(&unmasked), "GENE|0.5|0.0|0|-5");

    let masked = score(&genes, &ensemble, &ScoringConfig::new().with_distance(5).with_mask(true), &variant);
    assert_eq!(report(&masked), "GENE|0.0|0.0|-5|-5");
}

#[test]
fn test_chromosome_names_reconciled() {
    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus)].into_iter().collect();
    let ensemble = single_model(MockModel::new(CONTEXT).with_base_score(b'G', 0.5));

    let outcome = score(&genes, &ensemble, &ScoringConfig::new().with_distance(5), &Variant::new("1", 41, "a", "g"));
    assert_eq!(report(&outcome), "GENE|0.5|0.0|0|-5");
}

#[test]
fn test_skip_reasons() {
    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus)].into_iter().collect();
    let ensemble = single_model(MockModel::new(CONTEXT));
    let config = ScoringConfig::new().with_distance(5);

    let cases = [
        (Variant::new("chr1", 41, "C", "G"), ErrorCode::ReferenceMismatch),
        (Variant::new("chr1", 41, "AC", "GT"), ErrorCode::UnsupportedVariantFormat),
        (Variant::new("chr1", 41, "N", "G"), ErrorCode::UnsupportedVariantFormat),
        (Variant::new("chr1", 41, "ACGTACGTACG", "A"), ErrorCode::DeletionTooLarge),
        (Variant::new("chr1", 5, "A", "G"), ErrorCode::SequenceRetrievalFailure),
        (Variant::new("chr9", 41, "A", "G"), ErrorCode::SequenceRetrievalFailure),
        (Variant::new("chr1", u64::MAX, "A", "G"), ErrorCode::SequenceRetrievalFailure),
    ];
    for (variant, code) in cases {
        let outcome = score(&genes, &ensemble, &config, &variant);
        assert_eq!(skip_reason(&outcome).code(), code, "{}", variant);
    }
}

#[test]
fn test_zero_distance_skips_everything() {
    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus)].into_iter().collect();
    let ensemble = single_model(MockModel::new(CONTEXT));
    let outcome = score(&genes, &ensemble, &ScoringConfig::new().with_distance(0), &Variant::new("chr1", 41, "A", "G"));
    assert!(matches!(skip_reason(&outcome), SkipReason::DeletionTooLarge { .. }));
}

#[test]
fn test_model_failure_is_fatal() {
    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus)].into_iter().collect();
    let ensemble = single_model(MockModel::failing(CONTEXT));
    let sequences = sequences();
    let config = ScoringConfig::new().with_distance(5);
    let scorer = VariantScorer::new(&sequences, &genes, &ensemble, &config).unwrap();

    let err = scorer.score(1, &Variant::new("chr1", 41, "A", "G")).unwrap_err();
    assert!(matches!(err, SpliceError::Model { .. }));
}

#[test]
fn test_context_group_selection() {
    let member = |score: f32| Arc::new(MockModel::new(CONTEXT).with_base_score(b'G', score)) as SharedModel;
    let ensemble = ModelEnsemble::new(vec![
        ContextGroup::new("short", vec![member(0.2), member(0.4)]),
        ContextGroup::new("long", vec![member(0.9)]),
    ])
    .unwrap();
    let genes: GeneDb = [gene("GENE", 1, 100, Strand::Plus)].into_iter().collect();
    let variant = Variant::new("chr1", 41, "A", "G");
    let base = ScoringConfig::new().with_distance(5);

    // First group only, strongest member wins
    assert_eq!(report(&score(&genes, &ensemble, &base, &variant)), "GENE|0.4|0.0|0|-5");

    let all = base.clone().with_context_groups(GroupSelection::All);
    assert_eq!(report(&score(&genes, &ensemble, &all, &variant)), "GENE|0.9|0.0|0|-5");

    let averaged = base.clone().with_reduction(Reduction::ReplicateMean);
    assert_eq!(report(&score(&genes, &ensemble, &averaged, &variant)), "GENE|0.3|0.0|0|-5");

    let sequences = sequences();
    let missing = base.with_context_groups(GroupSelection::Indices(vec![2]));
    assert!(matches!(
        VariantScorer::new(&sequences, &genes, &ensemble, &missing),
        Err(SpliceError::InvalidEnsemble { .. })
    ));
}

/// Scores output position `j` as `j / 16`, minus one where the model sees a G
///
/// The ramp runs in model order, so it shifts every position downstream of
/// an insertion on the plus strand and upstream of it on the minus strand.
struct RampModel;

impl SpliceModel for RampModel {
    fn context(&self) -> usize {
        CONTEXT
    }

    fn predict(&self, input: &EncodedSequence) -> Result<PredictionVector, SpliceError> {
        let codes = input.codes();
        Ok(codes[CONTEXT..codes.len() - CONTEXT]
            .iter()
            .enumerate()
            .map(|(j, &code)| j as f32 / 16.0 - if code == 3 { 1.0 } else { 0.0 })
            .collect())
    }
}

#[test]
fn test_insertion_on_both_strands_with_downstream_boundary() {
    // Position 41 is 'A'; 42 starts the exon of G1 and ends the exon of G2
    let genes: GeneDb = [
        gene("G1", 1, 100, Strand::Plus).with_exons([(42, 60)]),
        gene("G2", 20, 60, Strand::Minus).with_exons([(30, 42)]),
    ]
    .into_iter()
    .collect();
    let ensemble = single_model_shared(Arc::new(RampModel));
    let variant = Variant::new("chr1", 41, "A", "AGG");
    let config = ScoringConfig::new().with_distance(2);

    let windows = WindowBuilder::new(2, CONTEXT).build(&variant, &sequences()).unwrap();
    assert_eq!(windows.length_delta(), 2);

    let predictor = EnsemblePredictor::new(&ensemble, &GroupSelection::default(), Reduction::PerMember).unwrap();
    // Plus: the inserted GG lose, the ramp raises everything past them
    let plus = predictor.score(&windows, Strand::Plus, 2).unwrap();
    assert_eq!(plus.gain, vec![0.0, 0.0, 0.0, -0.8125, -0.75, 0.125, 0.125]);
    // Minus: the ramp raises everything before the insertion instead
    let minus = predictor.score(&windows, Strand::Minus, 2).unwrap();
    assert_eq!(minus.gain, vec![0.125, 0.125, 0.125, 0.1875, 0.125, 0.0, 0.0]);

    let unmasked = score(&genes, &ensemble, &config, &variant);
    assert_eq!(report(&unmasked), "G1|0.12|-0.81|3|1|G2|0.19|0.0|1|3");

    // The boundary at 42 lands two positions further out, past the inserted bases
    let masked = score(&genes, &ensemble, &config.with_mask(true), &variant);
    assert_eq!(report(&masked), "G1|0.12|-0.81|4|1|G2|0.19|0.0|1|3");
}

#[test]
fn test_unstranded_gene_is_not_scored() {
    let gtf = "chr1\tsrc\tgene\t1\t100\t.\t.\t.\tgene_id \"U\";\n";
    let genes = read_gtf(gtf.as_bytes()).unwrap();
    let model = Arc::new(MockModel::new(CONTEXT));
    let ensemble = single_model_shared(model.clone());

    let outcome = score(&genes, &ensemble, &ScoringConfig::new().with_distance(5), &Variant::new("chr1", 41, "A", "G"));
    assert!(matches!(skip_reason(&outcome), SkipReason::NoOverlappingGene { pos: 41, .. }));
    assert_eq!(model.call_count(), 0);
}
