use kdam::{Bar, BarExt};
use odflow_core::model::progress::{ProgressEvent, ProgressReporter};

/// terminal progress bar for the edge flow sweep. the bar is created on the first
/// event since the number of pairs is only known once the OD matrix exists.
pub struct KdamProgress {
    desc: String,
    bar: Option<Bar>,
}

impl KdamProgress {
    pub fn new(desc: &str) -> KdamProgress {
        KdamProgress {
            desc: desc.to_string(),
            bar: None,
        }
    }
}

impl ProgressReporter for KdamProgress {
    fn report(&mut self, event: ProgressEvent) {
        if self.bar.is_none() {
            match Bar::builder()
                .desc(self.desc.clone())
                .total(event.total)
                .build()
            {
                Ok(bar) => self.bar = Some(bar),
                Err(e) => {
                    log::warn!("failed to build progress bar: {e}");
                    return;
                }
            }
        }
        if let Some(bar) = self.bar.as_mut() {
            if let Err(e) = bar.update_to(event.processed) {
                log::debug!("failed to update progress bar: {e}");
            }
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.as_mut() {
            if let Err(e) = bar.refresh() {
                log::debug!("failed to refresh progress bar: {e}");
            }
            eprintln!();
        }
    }
}
