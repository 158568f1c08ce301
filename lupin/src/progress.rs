use crate::network_common::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// Receives coarse progress milestones of a row-wise computation
///
/// Implementations only observe; they never change what is computed.
pub trait ProgressReporter: Send {
    /// `percent` of `total` rows are done (`done` rows so far)
    fn milestone(&mut self, percent: usize, done: usize, total: usize);

    fn finish(&mut self, _total: usize, _elapsed: Duration) {}
}

/// Report milestones through `log::info!`
pub struct LogProgress {
    label: Box<str>,
}

impl LogProgress {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressReporter for LogProgress {
    fn milestone(&mut self, percent: usize, done: usize, total: usize) {
        info!(
            "...{} progress: {}% ({}/{} rows)",
            self.label, percent, done, total
        );
    }

    fn finish(&mut self, total: usize, elapsed: Duration) {
        info!("{} finished {} rows in {:.2?}", self.label, total, elapsed);
    }
}

/// Report milestones on a terminal progress bar
pub struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    pub fn new(label: &str) -> anyhow::Result<Self> {
        let template = format!("{} {{bar:40}} {{pos:>3}}% ({{msg}} rows) ({{eta}})", label);
        let pb = ProgressBar::new(100)
            .with_style(ProgressStyle::with_template(&template)?.progress_chars("##-"));
        Ok(Self { pb })
    }
}

impl ProgressReporter for BarProgress {
    fn milestone(&mut self, percent: usize, done: usize, total: usize) {
        self.pb.set_message(format!("{}/{}", done, total));
        self.pb.set_position(percent as u64);
    }

    fn finish(&mut self, _total: usize, _elapsed: Duration) {
        self.pb.finish();
    }
}

/// Ignore every milestone
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn milestone(&mut self, _percent: usize, _done: usize, _total: usize) {}
}

/// Turn a stream of finished rows into percentage milestones at least
/// `step` percent apart. Completion is always a milestone.
#[derive(Debug)]
pub struct Milestones {
    total: usize,
    step: usize,
    done: usize,
    last: usize,
}

impl Milestones {
    pub fn new(total: usize, step: usize) -> Self {
        Self {
            total,
            step: step.max(1),
            done: 0,
            last: 0,
        }
    }

    pub fn done(&self) -> usize {
        self.done
    }

    /// Count one more finished row and return the percentage if it
    /// reaches the next milestone
    pub fn tick(&mut self) -> Option<usize> {
        self.done += 1;
        let percent = self.done * 100 / self.total.max(1);
        if percent >= self.last + self.step || (self.done == self.total && self.last < 100) {
            self.last = percent;
            Some(percent)
        } else {
            None
        }
    }
}

/// Drain one message per finished row until every sender hangs up,
/// forwarding milestones to `reporter`. Returns the number of rows
/// seen.
pub fn aggregate_progress(
    rx: Receiver<usize>,
    total: usize,
    reporter: &mut dyn ProgressReporter,
) -> usize {
    let mut milestones = Milestones::new(total, PROGRESS_STEP_PERCENT);
    for _row in rx.iter() {
        if let Some(percent) = milestones.tick() {
            reporter.milestone(percent, milestones.done(), total);
        }
    }
    milestones.done()
}
