//! Splice-site prediction models
//!
//! Models are opaque: they receive an encoded window and return one score
//! per position after trimming a fixed context flank from each side. This
//! module provides the [`SpliceModel`] trait, the [`ModelEnsemble`] that
//! groups models by training context, per-device serialization, a JSON
//! position-weight-matrix backend and a mock for tests.

pub mod backend;
pub mod device;
pub mod ensemble;
pub mod manifest;
pub mod mock;
pub mod pwm;

pub use backend::{PredictionVector, SpliceModel};
pub use device::{DeviceBound, DeviceRegistry};
pub use ensemble::{ContextGroup, ModelEnsemble, SharedModel};
pub use manifest::{load_ensemble, EnsembleManifest, GroupManifest};
pub use mock::MockModel;
pub use pwm::{Motif, PwmModel};
