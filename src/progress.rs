// src/progress.rs

//! Progress reporting for clones.
//!
//! libgit2 reports raw transfer statistics from its callbacks. [`TransferStage::classify`]
//! turns them into a phase plus a done/total pair, which a [`ProgressReporter`]
//! renders. The HTTP surface does not stream progress and passes no reporter.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Phase of a running clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStage {
    /// Downloading objects from the remote.
    Receiving,
    /// Indexing deltas after every object has arrived.
    Resolving,
}

impl TransferStage {
    pub fn label(self) -> &'static str {
        match self {
            TransferStage::Receiving => "Receiving objects",
            TransferStage::Resolving => "Resolving deltas",
        }
    }

    /// Maps libgit2 transfer counters to `(stage, done, total)`.
    ///
    /// Returns `None` before the remote has announced any objects.
    ///
    /// ```
    /// use nice_clone::progress::TransferStage;
    ///
    /// assert_eq!(
    ///     TransferStage::classify(3, 10, 0, 0),
    ///     Some((TransferStage::Receiving, 3, 10))
    /// );
    /// assert_eq!(
    ///     TransferStage::classify(10, 10, 2, 4),
    ///     Some((TransferStage::Resolving, 2, 4))
    /// );
    /// assert_eq!(TransferStage::classify(0, 0, 0, 0), None);
    /// ```
    pub fn classify(
        received_objects: usize,
        total_objects: usize,
        indexed_deltas: usize,
        total_deltas: usize,
    ) -> Option<(TransferStage, u64, u64)> {
        if total_objects == 0 {
            return None;
        }
        if received_objects < total_objects {
            Some((
                TransferStage::Receiving,
                received_objects as u64,
                total_objects as u64,
            ))
        } else {
            Some((
                TransferStage::Resolving,
                indexed_deltas as u64,
                total_deltas as u64,
            ))
        }
    }
}

/// Receives progress updates from a running clone.
pub trait ProgressReporter: Send + Sync {
    /// Called from the transfer callback whenever the counters move.
    fn update(&self, stage: TransferStage, done: u64, total: u64);
    /// Called once when the clone ends, successfully or not.
    fn finish(&self, message: &str);
}

/// A `ProgressReporter` that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn update(&self, _stage: TransferStage, _done: u64, _total: u64) {}
    fn finish(&self, _message: &str) {}
}

/// Terminal progress bar backed by `indicatif`, drawn on stderr.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg:>18} [{bar:40.cyan/blue}] {pos}/{len} ({elapsed})")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn update(&self, stage: TransferStage, done: u64, total: u64) {
        self.bar.set_message(stage.label());
        self.bar.set_length(total);
        self.bar.set_position(done);
    }

    fn finish(&self, message: &str) {
        self.bar.finish_and_clear();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiving_until_all_objects_arrive() {
        assert_eq!(
            TransferStage::classify(9, 10, 0, 5),
            Some((TransferStage::Receiving, 9, 10))
        );
        assert_eq!(
            TransferStage::classify(10, 10, 0, 5),
            Some((TransferStage::Resolving, 0, 5))
        );
    }

    #[test]
    fn test_repo_without_deltas_resolves_to_zero_of_zero() {
        assert_eq!(
            TransferStage::classify(4, 4, 0, 0),
            Some((TransferStage::Resolving, 0, 0))
        );
    }
}
