use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const ONLY_MESSAGE_TEMPLATE: &str = "{spinner} {wide_msg}";
const TICK: Duration = Duration::from_millis(100);

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn only_message() -> ProgressStyle {
        ProgressStyle::with_template(ONLY_MESSAGE_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

pub trait SpinnerNew {
    /// A ticking spinner on stderr, so stdout stays clean for the JSON response.
    fn stderr_spinner(message: impl ToString) -> ProgressBar;
}

impl SpinnerNew for ProgressBar {
    fn stderr_spinner(message: impl ToString) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(ProgressStyleTemplate::only_message());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK);
        pb
    }
}
