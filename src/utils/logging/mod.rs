//! Log messages, console summaries and progress bars

pub mod console;
pub mod log;
pub mod progress;

pub use self::log::{log_read_complete, log_read_start, log_warning, log_written};
pub use self::progress::{
    create_main_progress_bar, create_spinner, finish_progress_bar, optional_progress_bar,
};
