/// Interactivity flags the host applies to the header root and every word
/// link. While a sequence holds the lock both are off, so clicks cannot
/// reach the header at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interactivity {
    pub pointer_events: bool,
    pub inert: bool,
}

impl Interactivity {
    pub const ENABLED: Interactivity = Interactivity {
        pointer_events: true,
        inert: false,
    };

    pub const BLOCKED: Interactivity = Interactivity {
        pointer_events: false,
        inert: true,
    };

    pub fn accepts_input(self) -> bool {
        self.pointer_events && !self.inert
    }
}

impl Default for Interactivity {
    fn default() -> Self {
        Self::ENABLED
    }
}
