//! Process-wide ephemeral message slot. One current message, replaced by
//! each new `show`, auto-cleared after [`DISPLAY_TIMEOUT`]. Replacing a
//! message restarts the timer for the new one; a pending timer for an
//! older message never clears a newer one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How long a message stays up before auto-clearing.
pub const DISPLAY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashMessage {
    pub text: String,
    pub kind: FlashKind,
}

#[derive(Default)]
struct Slot {
    message: Option<FlashMessage>,
    /// Bumped on every show/clear so stale expiry timers no-op.
    generation: u64,
}

/// Cloneable handle to the single message slot.
#[derive(Clone, Default)]
pub struct FlashRelay {
    inner: Arc<Mutex<Slot>>,
}

impl FlashRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current message and restart the display timer.
    pub fn show(&self, text: impl Into<String>, kind: FlashKind) {
        let generation = {
            let mut slot = self.inner.lock().expect("flash lock poisoned");
            slot.generation += 1;
            slot.message = Some(FlashMessage {
                text: text.into(),
                kind,
            });
            slot.generation
        };
        let relay = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(DISPLAY_TIMEOUT).await;
            relay.expire(generation);
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text, FlashKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text, FlashKind::Error);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.show(text, FlashKind::Info);
    }

    pub fn current(&self) -> Option<FlashMessage> {
        self.inner.lock().expect("flash lock poisoned").message.clone()
    }

    /// Dismiss the current message immediately.
    pub fn clear(&self) {
        let mut slot = self.inner.lock().expect("flash lock poisoned");
        slot.generation += 1;
        slot.message = None;
    }

    fn expire(&self, generation: u64) {
        let mut slot = self.inner.lock().expect("flash lock poisoned");
        if slot.generation == generation {
            slot.message = None;
        }
    }
}
