//! Gene annotation
//!
//! Provides the gene model, the annotation provider trait, an in-memory
//! gene database with GTF/JSON loaders, and strand-split overlap resolution.

pub mod db;
pub mod gene;
pub mod loader;
pub mod overlap;
pub mod provider;

pub use db::GeneDb;
pub use gene::{Exon, Gene, Strand};
pub use loader::{load_gtf, read_gtf};
pub use overlap::{GeneOverlapResolver, OverlappingGenes};
pub use provider::AnnotationProvider;
