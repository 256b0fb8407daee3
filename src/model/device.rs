//! Per-device inference serialization
//!
//! Models bound to the same accelerator share one lock, so at most one of
//! them runs at a time. Models on different devices never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use crate::error::SpliceError;
use crate::model::backend::{PredictionVector, SpliceModel};
use crate::score::EncodedSequence;

/// Hands out one lock per device name
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for `device`, created on first use
    pub fn lock_for(&self, device: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(device.to_string()).or_insert_with(|| {
            debug!("Registering inference device {}", device);
            Arc::new(Mutex::new(()))
        }))
    }

    /// Bind a model to a device
    pub fn bind<M: SpliceModel>(&self, device: &str, model: M) -> DeviceBound<M> {
        DeviceBound {
            model,
            device: device.to_string(),
            lock: self.lock_for(device),
        }
    }

    /// Number of distinct devices seen so far
    pub fn device_count(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// A model whose inference holds its device lock
pub struct DeviceBound<M> {
    model: M,
    device: String,
    lock: Arc<Mutex<()>>,
}

impl<M> DeviceBound<M> {
    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn inner(&self) -> &M {
        &self.model
    }
}

impl<M: SpliceModel> SpliceModel for DeviceBound<M> {
    fn context(&self) -> usize {
        self.model.context()
    }

    fn predict(&self, input: &EncodedSequence) -> Result<PredictionVector, SpliceError> {
        // A panic in another model leaves no state behind the lock
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.model.predict(input)
    }
}
