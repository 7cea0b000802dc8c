//! progress reporting hook for long O(n²) sweeps. reporters observe the sweep and
//! never influence its result.

/// default number of processed pairs between progress notifications
pub const DEFAULT_PROGRESS_BATCH_SIZE: usize = 1000;

/// a progress notification emitted at a batch boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub processed: usize,
    pub total: usize,
}

impl ProgressEvent {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 * 100.0) / self.total as f64
        }
    }
}

pub trait ProgressReporter {
    fn report(&mut self, event: ProgressEvent);

    /// called once after the final item has been processed
    fn finish(&mut self) {}
}

/// discards all progress notifications
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _event: ProgressEvent) {}
}

/// writes progress notifications to the log at debug level
pub struct LogProgress {
    pub label: String,
}

impl ProgressReporter for LogProgress {
    fn report(&mut self, event: ProgressEvent) {
        log::debug!(
            "{}: {:.2}% ({}/{} pairs processed)",
            self.label,
            event.percent(),
            event.processed,
            event.total
        );
    }
}

impl<F> ProgressReporter for F
where
    F: FnMut(ProgressEvent),
{
    fn report(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// counts processed items and forwards an event to the reporter every `batch_size` items.
pub(crate) struct BatchProgress<'a> {
    reporter: &'a mut dyn ProgressReporter,
    batch_size: usize,
    total: usize,
    processed: usize,
    last_reported: usize,
}

impl<'a> BatchProgress<'a> {
    pub fn new(
        reporter: &'a mut dyn ProgressReporter,
        batch_size: usize,
        total: usize,
    ) -> BatchProgress<'a> {
        BatchProgress {
            reporter,
            batch_size: batch_size.max(1),
            total,
            processed: 0,
            last_reported: 0,
        }
    }

    pub fn tick(&mut self) {
        self.processed += 1;
        if self.processed - self.last_reported >= self.batch_size {
            self.reporter.report(ProgressEvent {
                processed: self.processed,
                total: self.total,
            });
            self.last_reported = self.processed;
        }
    }

    pub fn finish(self) {
        self.reporter.finish();
    }
}
