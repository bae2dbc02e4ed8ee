use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// A shareable cancellation flag for a running scroll animation.
///
/// Cancellation is observed at the next step boundary; the window stays exactly as the last
/// committed step left it.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
