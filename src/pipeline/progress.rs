// file: src/pipeline/progress.rs
// description: batch import statistics and progress reporting
// reference: https://docs.rs/indicatif

use indicatif::{ProgressBar, ProgressStyle};

/// Aggregate outcome of a batch import. Per-file failures are isolated
/// and counted; they never abort the remaining batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub imported: usize,
    pub duplicates: usize,
    pub failed: usize,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.imported + self.duplicates + self.failed
    }

    pub fn summary(&self) -> String {
        format!(
            "{} imported, {} duplicates, {} failed",
            self.imported, self.duplicates, self.failed
        )
    }
}

pub fn batch_progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("progress template is valid")
            .progress_chars("##-"),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_totals() {
        let stats = BatchStats {
            imported: 3,
            duplicates: 1,
            failed: 2,
        };
        assert_eq!(stats.total(), 6);
        assert_eq!(stats.summary(), "3 imported, 1 duplicates, 2 failed");
    }

    #[test]
    fn test_new_stats_are_zeroed() {
        assert_eq!(BatchStats::new().total(), 0);
    }
}
