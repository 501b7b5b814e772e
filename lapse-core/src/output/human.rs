use colored::Colorize;

use super::OutputFormatter;
use crate::expiry::{Evaluation, ExpiryStatus};

/// Renders the single supervisor-facing line, with the status word
/// colored when writing to an interactive terminal.
pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn status_word(&self, status: ExpiryStatus) -> String {
        if !self.use_colors {
            return status.to_string();
        }
        let word = status.to_string();
        match status {
            ExpiryStatus::Ok => word.bright_green().bold().to_string(),
            ExpiryStatus::Warning => word.bright_yellow().bold().to_string(),
            ExpiryStatus::Critical => word.bright_red().bold().to_string(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_evaluation(&self, evaluation: &Evaluation) -> String {
        // The message already carries the uncolored status word; swap in
        // the colored one without disturbing the rest of the line.
        let plain = evaluation.status.to_string();
        match evaluation.message.strip_prefix(&plain) {
            Some(rest) => format!("{}{}", self.status_word(evaluation.status), rest),
            None => evaluation.message.clone(),
        }
    }
}
