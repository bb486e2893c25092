use std::sync::Arc;

use crate::universal_coord::UniversalCoord;

/// Galaxy, nebula or cluster. Only its position matters to the frame graph.
#[derive(Debug)]
pub struct DeepSkyObject {
    name: String,
    position: UniversalCoord,
}

impl DeepSkyObject {
    pub fn new(name: impl Into<String>, position: UniversalCoord) -> Arc<Self> {
        Arc::new(DeepSkyObject {
            name: name.into(),
            position,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> UniversalCoord {
        self.position
    }
}
