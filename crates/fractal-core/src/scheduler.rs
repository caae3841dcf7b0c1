// File: crates/fractal-core/src/scheduler.rs
// Summary: Per-engine repaint coalescing: at most one paint per display refresh.

/// Dirty flag plus a single pending-paint slot. Requests made while a paint
/// is pending are absorbed; the paint that eventually runs sees the latest state.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
    requested: u64,
    coalesced: u64,
}

impl FrameScheduler {
    pub fn new() -> Self { Self::default() }

    /// Mark the surface dirty. Returns `true` if this request scheduled a new
    /// paint, `false` if one was already pending.
    pub fn request(&mut self) -> bool {
        self.requested += 1;
        if self.pending {
            self.coalesced += 1;
            false
        } else {
            self.pending = true;
            true
        }
    }

    pub fn is_pending(&self) -> bool { self.pending }

    /// Consume the pending paint, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn requested(&self) -> u64 { self.requested }
    pub fn coalesced(&self) -> u64 { self.coalesced }
}
