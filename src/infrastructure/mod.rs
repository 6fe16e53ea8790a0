//! Infrastructure layer - Input streams and XML formatting

pub mod input;
pub mod pretty;

pub use input::{read_input, read_stdin};
pub use pretty::pretty_print;
