use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indicatif::{HumanDuration, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Advisory progress UI: a stage spinner plus a processed-comment counter.
/// When disabled, all bars are hidden and every call is a cheap no-op, so the
/// scrape logic can report unconditionally.
pub struct Progress {
    enabled: bool,
    start: Instant,
    mp: Option<MultiProgress>,
    stage: ProgressBar,
    comments: ProgressBar,
    processed: AtomicU64,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        let start = Instant::now();

        if !enabled {
            return Self {
                enabled: false,
                start,
                mp: None,
                stage: ProgressBar::hidden(),
                comments: ProgressBar::hidden(),
                processed: AtomicU64::new(0),
            };
        }

        let mp = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

        let stage = mp.add(ProgressBar::new_spinner());
        stage.set_style(
            ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]").unwrap(),
        );
        stage.enable_steady_tick(Duration::from_millis(80));
        stage.set_message("starting");

        let comments = mp.add(ProgressBar::new(0));
        comments.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        comments.set_message("comments");

        Self {
            enabled: true,
            start,
            mp: Some(mp),
            stage,
            comments,
            processed: AtomicU64::new(0),
        }
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stage.set_message(msg.into());
    }

    /// Length comes from the post's reported comment count; deleted comments
    /// and late replies mean the real total can land on either side of it.
    pub fn set_expected(&self, total: u64) {
        if self.enabled {
            self.comments.set_length(total);
        }
    }

    pub fn comment_done(&self) {
        let n = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.enabled {
            self.comments.inc(1);
            if n % 50 == 0 {
                self.comments.set_message(format!("{n} processed"));
            }
        }
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        self.stage.finish_with_message("done");
        self.comments.finish_and_clear();
        if let Some(mp) = &self.mp {
            let _ = mp.println(format!("Done in {}", HumanDuration(self.start.elapsed())));
        }
    }
}
