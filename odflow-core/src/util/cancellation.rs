use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// cooperative cancellation flag shared between a caller and a running sweep.
/// sweeps check the token between rows, so cancellation latency is one row of work.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
