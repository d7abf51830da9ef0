pub mod fallback;
pub mod prompt_builder;
pub mod response_parser;

pub use fallback::sample_questions_from_text;
pub use prompt_builder::build_prompt;
pub use response_parser::parse_questions;
