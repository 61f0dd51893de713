mod fallback;

pub use fallback::{fallback_questions, generic_pool, topic_pool};
