//! Shared test utilities for the heatmap workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Deterministic sample generators
//! - Common fixtures (regions, the two-station scenario)
//! - Temporary GeoJSON files
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that a point lies on the segment between two endpoints.
///
/// Checks collinearity (cross product) and that the point falls within the
/// segment's bounding box, both to `epsilon`.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_on_segment;
///
/// assert_on_segment!((0.5, 0.5), (0.0, 0.0), (1.0, 1.0), 1e-9);
/// ```
#[macro_export]
macro_rules! assert_on_segment {
    (($px:expr, $py:expr), ($ax:expr, $ay:expr), ($bx:expr, $by:expr), $epsilon:expr) => {{
        let (px, py): (f64, f64) = ($px as f64, $py as f64);
        let (ax, ay): (f64, f64) = ($ax as f64, $ay as f64);
        let (bx, by): (f64, f64) = ($bx as f64, $by as f64);
        let epsilon: f64 = $epsilon as f64;
        let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
        if cross.abs() > epsilon
            || px < ax.min(bx) - epsilon
            || px > ax.max(bx) + epsilon
            || py < ay.min(by) - epsilon
            || py > ay.max(by) + epsilon
        {
            panic!(
                "assertion failed: point ({:?}, {:?}) not on segment ({:?}, {:?})-({:?}, {:?}), cross = {:?}",
                px, py, ax, ay, bx, by, cross
            );
        }
    }};
}
