//! Image decoding and encoding
//!
//! The pipeline talks to the filesystem through these traits so tests can
//! swap in in-memory implementations.

mod image_reader;
mod image_writer;
mod reader;
mod writer;

pub use image_reader::ImageCrateReader;
pub use image_writer::ImageCrateWriter;
pub use reader::ImageReader;
pub use writer::ImageWriter;
