use serde::{Deserialize, Serialize};

use crate::types::Tick;

/// Fire-and-forget notifications for the host (audio and end-of-run handling).
/// Nothing is ever read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Looped ambient sound starts with the run
    AmbientStart,
    AmbientStop,
    Jump,
    Death,
    GameOver { ticks: Tick },
}
