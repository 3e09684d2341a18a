use serde::{Deserialize, Serialize};

use crate::listeners::{ChangeListeners, DatasetChangeEvent, DatasetChangeKind};
use crate::traits::ValueDataset;

/// A single optional value, as shown by a meter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DefaultValueDataset {
    value: Option<f64>,
    #[serde(skip)]
    listeners: ChangeListeners<DatasetChangeEvent>,
}

impl DefaultValueDataset {
    pub fn new(value: Option<f64>) -> Self {
        Self {
            value,
            listeners: Default::default(),
        }
    }

    pub fn listeners_mut(&mut self) -> &mut ChangeListeners<DatasetChangeEvent> {
        &mut self.listeners
    }

    pub fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
        self.listeners.notify(&DatasetChangeEvent::new(
            "DefaultValueDataset",
            DatasetChangeKind::ValueChanged,
        ));
    }
}

impl ValueDataset for DefaultValueDataset {
    fn value(&self) -> Option<f64> {
        self.value
    }
}
