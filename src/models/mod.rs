mod category;
mod question;

pub use category::Category;
pub use question::{NUM_OPTIONS, Question, QuestionCount, QuestionSet};

/// Which screen the terminal UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Loading,
    Quiz,
    Result,
}
