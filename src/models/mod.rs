pub mod chapter;
pub mod generation;
pub mod question;

pub use chapter::{chapter_title_from_id, is_safe_chapter_id, ChapterSummary};
pub use generation::{GenerationRequest, GenerationResult, QuestionSource};
pub use question::Question;
