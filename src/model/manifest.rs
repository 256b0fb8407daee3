//! Ensemble manifest loading
//!
//! A manifest lists the context groups of an ensemble and the model files
//! of each group:
//!
//! ```json
//! {
//!   "groups": [
//!     { "name": "ctx0", "device": "cuda:0", "members": ["ctx0.rep1.json", "ctx0.rep2.json"] },
//!     { "name": "ctx2", "members": ["ctx2.rep1.json"] }
//!   ]
//! }
//! ```
//!
//! Relative member paths are resolved against the manifest's directory.
//! Members of a group with a `device` share that device's inference lock.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SpliceError;
use crate::model::device::DeviceRegistry;
use crate::model::ensemble::{ContextGroup, ModelEnsemble, SharedModel};
use crate::model::pwm::PwmModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleManifest {
    pub groups: Vec<GroupManifest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupManifest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    pub members: Vec<PathBuf>,
}

/// Load every model named by a manifest into an ensemble
pub fn load_ensemble<P: AsRef<Path>>(path: P) -> Result<ModelEnsemble, SpliceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SpliceError::Io {
        msg: format!("Failed to read model manifest {}: {}", path.display(), e),
    })?;
    let manifest: EnsembleManifest = serde_json::from_str(&content)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let registry = DeviceRegistry::new();
    let mut groups = Vec::with_capacity(manifest.groups.len());
    for group in manifest.groups {
        let mut members: Vec<SharedModel> = Vec::with_capacity(group.members.len());
        for member in &group.members {
            let model = PwmModel::from_json(base.join(member))?;
            members.push(match &group.device {
                Some(device) => Arc::new(registry.bind(device, model)),
                None => Arc::new(model),
            });
        }
        groups.push(ContextGroup::new(group.name, members));
    }

    let ensemble = ModelEnsemble::new(groups)?;
    info!(
        "Loaded {} models in {} context groups from {}",
        ensemble.member_count(),
        ensemble.groups().len(),
        path.display()
    );
    Ok(ensemble)
}
