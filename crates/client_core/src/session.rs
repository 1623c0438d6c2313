use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use shared::domain::SessionMode;

/// Session mode shared by every controller of one page.
///
/// Set once by a successful login and only returned to standard by logout.
#[derive(Debug, Clone, Default)]
pub struct Session {
    elevated: Arc<AtomicBool>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SessionMode {
        if self.elevated.load(Ordering::Acquire) {
            SessionMode::Elevated
        } else {
            SessionMode::Standard
        }
    }

    pub fn is_elevated(&self) -> bool {
        self.mode().is_elevated()
    }

    pub(crate) fn establish(&self, mode: SessionMode) {
        if mode.is_elevated() {
            self.elevated.store(true, Ordering::Release);
        }
    }

    pub(crate) fn end(&self) {
        self.elevated.store(false, Ordering::Release);
    }
}
