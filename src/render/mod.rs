//! Rendering backends and rasterization.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: Smooth line rendering with sub-pixel accuracy
//! - **Bresenham's Line**: Fast non-antialiased line drawing
//! - **Scanline Ellipse Fill**: Data-unit circles rasterized after scaling
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{
    draw_ellipse_outline, draw_line, draw_line_aa, draw_marker, draw_polyline, draw_rect,
    draw_rect_outline, fill_ellipse, DashPattern,
};
