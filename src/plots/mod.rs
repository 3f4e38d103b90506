//! High-level plot types.
//!
//! Provides the two plotting helpers with builder APIs: data-unit circle
//! scatters and binned percentile-band comparisons.

mod circles;
mod compare;

pub use circles::{CircleCollection, CircleStyle, Circles, ColorSpec, Coord};
pub use compare::{Compare, CompareSummary, LineStyle, Orientation};
