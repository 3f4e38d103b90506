//! # Bandplot
//!
//! Two small plotting helpers on a pure-Rust raster surface: a circle
//! scatter whose radii live in data units rather than pixels, and a
//! "compare" plot that bins one variable, computes percentile bands of a
//! second variable per bin, and renders the summary as styled curves,
//! median markers and shaded sigma bands.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library for
//! SIMD-accelerated reductions, with zero JavaScript/HTML dependencies.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bandplot::prelude::*;
//!
//! let x: Vec<f32> = (0..1000).map(|i| i as f32 / 10.0).collect();
//! let y: Vec<f32> = x.iter().map(|v| v * v / 100.0).collect();
//!
//! // Percentile bands of y across ten equal-width x bins
//! let mut ax = Axes::new();
//! let summary = Compare::new(&x, &y).fill(true).legend(true).draw(&mut ax)?;
//!
//! // Render to PNG
//! ax.save_png("compare.png")?;
//! ```
//!
//! ## Design
//!
//! There is no ambient "current surface": every drawing call takes an
//! explicit [`axes::Axes`] handle owned by the caller. Scalar-vs-sequence
//! inputs are expressed as a tagged union ([`plots::Coord`]) and resolved
//! once at the call boundary, and style options are enumerated structs
//! rather than open-ended passthrough.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color token parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Summary statistics: midpoints, percentiles, band tables.
pub mod stats;

// ============================================================================
// Visualization Modules
// ============================================================================

/// The explicit drawing surface.
pub mod axes;

/// High-level plot types (circle scatter, percentile-band compare).
pub mod plots;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rendering backends and rasterization.
pub mod render;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for bandplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use bandplot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axes::{Axes, CollectionId, LegendLocation};
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::plots::{
        CircleCollection, CircleStyle, Circles, ColorSpec, Compare, CompareSummary, Coord,
        LineStyle, Orientation,
    };
    pub use crate::render::DashPattern;
    pub use crate::scale::{ColorScale, Colormap, LinearScale, Scale};
    pub use crate::stats::{mid, BandStat, BandTable};
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
