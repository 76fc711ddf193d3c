//! Progress bar display for header generation

use indicatif::{ProgressBar, ProgressStyle};

/// Progress over the families of one run
pub struct ProgressDisplay {
    family_pb: ProgressBar,
}

impl ProgressDisplay {
    /// Create a new progress display with total family count
    pub fn new(total_families: u64) -> Self {
        let family_pb = ProgressBar::new(total_families);
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            family_pb.set_style(style.progress_chars("#>-"));
        }

        Self { family_pb }
    }

    /// A display that never draws
    pub fn hidden() -> Self {
        Self {
            family_pb: ProgressBar::hidden(),
        }
    }

    /// Show the family being generated
    pub fn update_family(&self, family_name: &str) {
        self.family_pb.set_message(family_name.to_string());
    }

    /// Increment family progress
    pub fn inc_family(&self) {
        self.family_pb.inc(1);
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.family_pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.family_pb.abandon();
    }
}
