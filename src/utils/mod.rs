mod progress;

pub use progress::SpinnerNew;
