//! # Consent Gate
//!
//! Disclaimer shown before first use. Dismissing it records the acknowledgment
//! for the rest of the session; reopening it later is for reading only.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentGate {
    visible: bool,
    acknowledged: bool,
}

impl Default for ConsentGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsentGate {
    /// Visible and not yet acknowledged.
    pub fn new() -> Self {
        Self {
            visible: true,
            acknowledged: false,
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.acknowledged = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// True only for the first showing, before the user has ever dismissed it.
    pub fn blocks_input(&self) -> bool {
        self.visible && !self.acknowledged
    }
}
