use crate::Bridge;

/// Whether guest calls are permitted.
///
/// Only moves from `NotReady` to `Ready`, and only once. The bridge is held
/// inside the `Ready` variant, so there is no way to reach the guest without
/// going through this check.
#[derive(Default)]
pub enum Readiness {
    #[default]
    NotReady,
    Ready(Bridge),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready(_))
    }

    pub fn bridge_mut(&mut self) -> Option<&mut Bridge> {
        match self {
            Readiness::Ready(bridge) => Some(bridge),
            Readiness::NotReady => None,
        }
    }
}

/// The lifecycle phase published to observers of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initialization has not finished yet.
    #[default]
    NotReady,
    /// The guest module is loaded. Terminal.
    Ready,
    /// Initialization failed. Terminal; the session stays not ready.
    Failed,
}
