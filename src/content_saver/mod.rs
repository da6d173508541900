//! Writing clipped documents to disk

mod markdown_saver;

pub use markdown_saver::save_clipped_document;
