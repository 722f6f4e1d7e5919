//! Types and methods for reading text input.

pub mod file;

pub use file::InputFile;
