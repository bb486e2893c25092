use std::sync::Arc;

use crate::{rotation::RotationModel, universal_coord::UniversalCoord};

/// A star at a fixed universal position.
#[derive(Debug)]
pub struct Star {
    name: String,
    position: UniversalCoord,
    rotation_model: RotationModel,
}

impl Star {
    pub fn new(
        name: impl Into<String>,
        position: UniversalCoord,
        rotation_model: RotationModel,
    ) -> Arc<Self> {
        Arc::new(Star {
            name: name.into(),
            position,
            rotation_model,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> UniversalCoord {
        self.position
    }

    pub fn rotation_model(&self) -> &RotationModel {
        &self.rotation_model
    }
}
