//! PNG output encoding.
//!
//! Pure Rust PNG encoding using the `png` crate.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::framebuffer::Framebuffer;

/// Write a framebuffer to a PNG file.
///
/// # Errors
///
/// Returns an error if file creation or PNG encoding fails.
pub fn write_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    encode_into(fb, writer)
}

/// Encode a framebuffer to PNG bytes in memory.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn encode_png(fb: &Framebuffer) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_into(fb, &mut buffer)?;
    Ok(buffer)
}

fn encode_into<W: std::io::Write>(fb: &Framebuffer, writer: W) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, fb.width(), fb.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    // Compact pixels strip the stride padding
    writer.write_image_data(&fb.to_compact_pixels())?;
    Ok(())
}
