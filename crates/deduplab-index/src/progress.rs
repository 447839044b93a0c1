use indicatif::{ProgressBar, ProgressStyle};
use std::sync::OnceLock;

/// Headless-friendly progress callback. The Indexer never requires a TUI
/// dependency; callers that want one provide `IndicatifSink`, callers that
/// don't use `NoopSink` (the default) at zero cost.
pub trait ProgressSink: Sync {
    fn on_file_done(&self, processed: u64, total: u64);
    fn finish(&self) {}
}

#[derive(Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {
    fn on_file_done(&self, _processed: u64, _total: u64) {}
}

const PB_STYLE: &str =
    "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({eta}) {wide_msg}";
const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";
const PB_CHARS: &str = "█▓▒░  ";

fn style() -> &'static ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE.get_or_init(|| {
        ProgressStyle::with_template(PB_STYLE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars(TICK)
            .progress_chars(PB_CHARS)
    })
}

pub struct IndicatifSink {
    bar: ProgressBar,
}

impl IndicatifSink {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(style().clone());
        bar.set_prefix("indexing");
        Self { bar }
    }
}

impl ProgressSink for IndicatifSink {
    fn on_file_done(&self, processed: u64, _total: u64) {
        self.bar.set_position(processed);
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
