//! Linear-algebra primitives.
//!
//! - [`RectArray`]: zero-based dense rectangular arrays with checked access.
//!   The Powell minimizer keeps its direction set in a `RectArray<f64>`.
//! - [`Complex`]: complex numbers over `f64`.

pub mod complex;
pub mod rect_array;

pub use complex::{Complex, ParseComplexError};
pub use rect_array::{LinalgError, RectArray};
