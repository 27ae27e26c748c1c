//! Receipt scanning: turning OCR text into transaction candidates

pub mod draft;
pub mod extractor;
pub mod rules;

pub use draft::*;
pub use extractor::*;
