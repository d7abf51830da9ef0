pub mod chapter_store;

pub use chapter_store::ChapterStore;
