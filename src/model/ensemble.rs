//! Model ensembles organized by training context
//!
//! The reference model family ships several context groups, each holding
//! replicate models trained with a different seed. Scoring consults a
//! configurable subset of the groups.

use std::fmt;
use std::sync::Arc;

use crate::config::GroupSelection;
use crate::error::SpliceError;
use crate::model::backend::SpliceModel;

/// A model shared between the ensemble and its callers
pub type SharedModel = Arc<dyn SpliceModel>;

/// Replicate models sharing a training context
#[derive(Clone)]
pub struct ContextGroup {
    name: String,
    members: Vec<SharedModel>,
}

impl ContextGroup {
    pub fn new(name: impl Into<String>, members: Vec<SharedModel>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[SharedModel] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for ContextGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextGroup")
            .field("name", &self.name)
            .field("members", &self.members.len())
            .finish()
    }
}

/// Immutable, ordered set of context groups
///
/// Every member trims the same context flank, so one window size serves
/// the whole ensemble.
#[derive(Debug, Clone)]
pub struct ModelEnsemble {
    groups: Vec<ContextGroup>,
    context: usize,
}

impl ModelEnsemble {
    /// Build an ensemble from its groups
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::InvalidEnsemble`] if there are no groups, a
    /// group is empty, or the members disagree on their context flank.
    pub fn new(groups: Vec<ContextGroup>) -> Result<Self, SpliceError> {
        let first = groups
            .first()
            .and_then(|g| g.members.first())
            .ok_or_else(|| SpliceError::InvalidEnsemble {
                msg: "ensemble has no models".to_string(),
            })?;
        let context = first.context();

        for group in &groups {
            if group.is_empty() {
                return Err(SpliceError::InvalidEnsemble {
                    msg: format!("context group '{}' has no members", group.name),
                });
            }
            if let Some(other) = group.members.iter().map(|m| m.context()).find(|&c| c != context) {
                return Err(SpliceError::InvalidEnsemble {
                    msg: format!(
                        "context group '{}' mixes context {} with {}",
                        group.name, other, context
                    ),
                });
            }
        }

        Ok(Self { groups, context })
    }

    /// Ensemble with a single group holding `members`
    pub fn from_models(members: Vec<SharedModel>) -> Result<Self, SpliceError> {
        Self::new(vec![ContextGroup::new("default", members)])
    }

    /// Context flank trimmed by every member
    pub fn context(&self) -> usize {
        self.context
    }

    pub fn groups(&self) -> &[ContextGroup] {
        &self.groups
    }

    /// Total number of models across all groups
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(ContextGroup::len).sum()
    }

    /// Groups consulted under `selection`, in ensemble order
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::InvalidEnsemble`] if an index is out of range.
    pub fn select(&self, selection: &GroupSelection) -> Result<Vec<&ContextGroup>, SpliceError> {
        match selection {
            GroupSelection::All => Ok(self.groups.iter().collect()),
            GroupSelection::Indices(indices) if indices.is_empty() => Err(SpliceError::InvalidEnsemble {
                msg: "no context groups selected".to_string(),
            }),
            GroupSelection::Indices(indices) => {
                let mut selected = Vec::with_capacity(indices.len());
                for &idx in indices {
                    let group = self.groups.get(idx).ok_or_else(|| SpliceError::InvalidEnsemble {
                        msg: format!(
                            "context group {} requested but the ensemble has {}",
                            idx,
                            self.groups.len()
                        ),
                    })?;
                    selected.push(group);
                }
                Ok(selected)
            }
        }
    }
}
