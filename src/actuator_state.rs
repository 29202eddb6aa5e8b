use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

/// Requested on/off state of the two device LEDs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LedState {
    pub led1: bool,
    pub led2: bool,
}

/// Partial update: `None` leaves the corresponding flag untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct LedUpdate {
    pub led1: Option<bool>,
    pub led2: Option<bool>,
}

impl LedState {
    fn apply(&mut self, update: LedUpdate) {
        if let Some(led1) = update.led1 {
            self.led1 = led1;
        }
        if let Some(led2) = update.led2 {
            self.led2 = led2;
        }
    }
}

/// Process-local LED flags shared by every request handler.
///
/// Starts with both LEDs off and is lost on restart. Clones share the same
/// state; each update is applied under the write lock, so concurrent setters
/// never interleave within one update.
#[derive(Debug, Clone, Default)]
pub struct ActuatorState {
    inner: Arc<RwLock<LedState>>,
}

impl ActuatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `update` and return the resulting state.
    pub async fn update(&self, update: LedUpdate) -> LedState {
        let mut guard = self.inner.write().await;
        guard.apply(update);
        *guard
    }

    pub async fn snapshot(&self) -> LedState {
        *self.inner.read().await
    }
}
