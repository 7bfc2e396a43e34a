//! Progress reporting for pipeline runs

use assistant_application::ProgressNotifier;
use assistant_domain::Stage;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a run with a single progress bar
///
/// With parallel branches the summarize/translate and answer stages
/// interleave, so the message shows whichever stage changed last.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn run_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn active_message(stage: Stage) -> &'static str {
        match stage {
            Stage::Generate => "Generating text...",
            Stage::Summarize => "Summarizing...",
            Stage::Translate => "Translating to French...",
            Stage::Answer => "Answering question...",
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total_stages: usize) {
        let bar = ProgressBar::new(total_stages as u64);
        bar.set_style(Self::run_style());
        bar.set_prefix("Pipeline");
        bar.set_message("Starting...");
        bar.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_stage_start(&self, stage: Stage) {
        self.with_bar(|bar| bar.set_message(Self::active_message(stage)));
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        self.with_bar(|bar| {
            let status = if success {
                format!("{} {}", "v".green(), stage.display_name())
            } else {
                format!("{} {}", "x".red(), stage.display_name())
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_run_complete(&self, success: bool) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        if let Some(bar) = guard.take() {
            if success {
                bar.finish_with_message(format!("{}", "complete!".green()));
            } else {
                bar.abandon_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage) {
        eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), stage.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), stage.display_name());
        }
    }
}
