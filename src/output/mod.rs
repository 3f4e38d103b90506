//! Output encoders.

mod png_encoder;

pub use png_encoder::{encode_png, write_png};
