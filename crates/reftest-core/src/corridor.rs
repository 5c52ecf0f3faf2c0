//! 2D corridor containment.
//!
//! A corridor is bounded by a left and a right polyline. A point is inside
//! when it is not strictly left of any left-boundary segment and not strictly
//! right of any right-boundary segment. Sidedness comes from the sign of the
//! 2D cross product of the segment direction with the vector to the point:
//!
//! ```text
//! cross = (x2 - x1) * (py - y1) - (y2 - y1) * (px - x1)
//! ```
//!
//! `cross > 0` means left of the directed segment, `cross < 0` right of it.
//! Points lying exactly on a boundary count as inside. Both polylines must be
//! walked in the same direction (for example, both in increasing `y` for a
//! corridor running "north") for "between left and right" to mean inside.
//! Because every segment of a boundary is tested as an infinite half-plane,
//! the test is exact for convex corridors; crossing boundaries are the
//! caller's responsibility.

use log::debug;

use crate::error::{CheckResult, InvalidArgumentSnafu};
use crate::float::Float;

/// A boundary polyline given as parallel coordinate slices.
#[derive(Debug, Clone, Copy)]
pub struct Polyline<'a, T> {
    xs: &'a [T],
    ys: &'a [T],
}

impl<'a, T: Float> Polyline<'a, T> {
    /// Build a validated polyline.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` when the coordinate slices differ in
    /// length or hold fewer than two points.
    pub fn new(xs: &'a [T], ys: &'a [T]) -> CheckResult<Self> {
        if xs.len() != ys.len() {
            return InvalidArgumentSnafu {
                message: format!(
                    "boundary coordinate lengths differ (x={}, y={})",
                    xs.len(),
                    ys.len()
                ),
            }
            .fail();
        }
        if xs.len() < 2 {
            return InvalidArgumentSnafu {
                message: format!("boundary needs at least 2 points, got {}", xs.len()),
            }
            .fail();
        }
        Ok(Self { xs, ys })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always `false`; a validated polyline has at least two vertices.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Signed cross products of `(px, py)` against every segment.
    fn crosses(&self, px: T, py: T) -> impl Iterator<Item = T> + '_ {
        self.xs
            .windows(2)
            .zip(self.ys.windows(2))
            .map(move |(x, y)| cross(px, py, x[0], y[0], x[1], y[1]))
    }
}

#[inline]
fn cross<T: Float>(px: T, py: T, x1: T, y1: T, x2: T, y2: T) -> T {
    (x2 - x1) * (py - y1) - (y2 - y1) * (px - x1)
}

/// A region between a left and a right boundary polyline.
#[derive(Debug, Clone, Copy)]
pub struct Corridor<'a, T> {
    left: Polyline<'a, T>,
    right: Polyline<'a, T>,
}

impl<'a, T: Float> Corridor<'a, T> {
    /// Pair two validated boundaries.
    pub fn new(left: Polyline<'a, T>, right: Polyline<'a, T>) -> Self {
        Self { left, right }
    }

    /// Left boundary.
    pub fn left(&self) -> &Polyline<'a, T> {
        &self.left
    }

    /// Right boundary.
    pub fn right(&self) -> &Polyline<'a, T> {
        &self.right
    }

    /// True when `(x, y)` lies inside the corridor or on its boundary.
    pub fn contains(&self, x: T, y: T) -> bool {
        // NaN coordinates compare false and land outside.
        self.left.crosses(x, y).all(|c| c <= T::ZERO)
            && self.right.crosses(x, y).all(|c| c >= T::ZERO)
    }

    /// True when every point of the trajectory is inside.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument` when `xs` and `ys` differ in length. An
    /// empty trajectory passes.
    pub fn contains_all(&self, xs: &[T], ys: &[T]) -> CheckResult<bool> {
        if xs.len() != ys.len() {
            return InvalidArgumentSnafu {
                message: format!(
                    "trajectory coordinate lengths differ (x={}, y={})",
                    xs.len(),
                    ys.len()
                ),
            }
            .fail();
        }

        match xs
            .iter()
            .zip(ys)
            .position(|(&x, &y)| !self.contains(x, y))
        {
            Some(i) => {
                debug!("corridor check failed at index {i}: ({}, {}) outside", xs[i], ys[i]);
                Ok(false)
            }
            None => Ok(true),
        }
    }
}

/// True when every `(x_test[i], y_test[i])` lies within the corridor bounded
/// by `(x_left, y_left)` and `(x_right, y_right)`.
///
/// # Errors
///
/// Fails with `InvalidArgument` when the test coordinates differ in length,
/// when either boundary's coordinates differ in length, or when a boundary
/// has fewer than two points. These are checked before anything else, so an
/// empty trajectory against a malformed corridor is still an error.
pub fn is_within_2d_corridor<T: Float>(
    x_test: &[T],
    y_test: &[T],
    x_left: &[T],
    y_left: &[T],
    x_right: &[T],
    y_right: &[T],
) -> CheckResult<bool> {
    if x_test.len() != y_test.len() {
        return InvalidArgumentSnafu {
            message: format!(
                "trajectory coordinate lengths differ (x={}, y={})",
                x_test.len(),
                y_test.len()
            ),
        }
        .fail();
    }
    let left = Polyline::new(x_left, y_left)?;
    let right = Polyline::new(x_right, y_right)?;
    Corridor::new(left, right).contains_all(x_test, y_test)
}

#[cfg(test)]
mod tests {
    use super::*;

    const X_LEFT: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
    const Y_LEFT: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
    const X_RIGHT: [f64; 4] = [2.0, 2.0, 2.0, 2.0];
    const Y_RIGHT: [f64; 4] = [0.0, 1.0, 2.0, 3.0];

    fn check(xs: &[f64], ys: &[f64]) -> bool {
        is_within_2d_corridor(xs, ys, &X_LEFT, &Y_LEFT, &X_RIGHT, &Y_RIGHT).unwrap()
    }

    #[test]
    fn points_inside() {
        assert!(check(&[1.0], &[0.5]));
        assert!(check(&[1.0, 1.0, 1.0], &[0.5, 1.5, 2.5]));
    }

    #[test]
    fn left_of_left_boundary_is_outside() {
        assert!(!check(&[-1.0], &[0.5]));
        assert!(!check(&[1.0, -0.5], &[1.0, 1.0]));
    }

    #[test]
    fn right_of_right_boundary_is_outside() {
        assert!(!check(&[3.0], &[1.0]));
        assert!(!check(&[-1.0, 3.0, 1.0], &[1.0, 1.0, -1.0]));
    }

    #[test]
    fn boundary_points_are_inside() {
        assert!(check(&[0.0, 2.0, 1.0], &[1.0, 1.0, 0.0]));
    }

    #[test]
    fn nan_point_is_outside() {
        assert!(!check(&[f64::NAN], &[1.0]));
    }

    #[test]
    fn empty_trajectory_passes() {
        assert!(check(&[], &[]));
    }

    #[test]
    fn slanted_corridor() {
        // Corridor along y = x with half-width ~0.7 perpendicular.
        let xl = [-1.0_f32, 4.0];
        let yl = [0.0_f32, 5.0];
        let xr = [0.0_f32, 5.0];
        let yr = [-1.0_f32, 4.0];
        assert!(is_within_2d_corridor(&[1.0, 2.5], &[1.0, 2.6], &xl, &yl, &xr, &yr).unwrap());
        assert!(!is_within_2d_corridor(&[1.0], &[2.5], &xl, &yl, &xr, &yr).unwrap());
        assert!(!is_within_2d_corridor(&[2.5], &[1.0], &xl, &yl, &xr, &yr).unwrap());
    }

    #[test]
    fn rejects_trajectory_length_mismatch() {
        let err = is_within_2d_corridor(
            &[1.0, 2.0],
            &[1.0, 2.0, 3.0],
            &X_LEFT,
            &Y_LEFT,
            &X_RIGHT,
            &Y_RIGHT,
        )
        .unwrap_err();
        assert!(err.to_string().contains("trajectory coordinate lengths differ"));
    }

    #[test]
    fn rejects_boundary_length_mismatch() {
        let err = is_within_2d_corridor(&[1.0], &[1.0], &X_LEFT, &Y_LEFT[..3], &X_RIGHT, &Y_RIGHT)
            .unwrap_err();
        assert!(err.to_string().contains("boundary coordinate lengths differ"));
        assert!(
            is_within_2d_corridor(&[1.0], &[1.0], &X_LEFT, &Y_LEFT, &X_RIGHT[..2], &Y_RIGHT)
                .is_err()
        );
    }

    #[test]
    fn rejects_single_point_boundary() {
        let one = [1.0];
        let err =
            is_within_2d_corridor(&[1.0], &[0.5], &one, &one, &X_RIGHT, &Y_RIGHT).unwrap_err();
        assert!(err.to_string().contains("at least 2 points"));
        assert!(is_within_2d_corridor::<f64>(&[], &[], &X_LEFT, &Y_LEFT, &one, &one).is_err());
    }

    #[test]
    fn typed_corridor_api() {
        let left = Polyline::new(&X_LEFT, &Y_LEFT).unwrap();
        let right = Polyline::new(&X_RIGHT, &Y_RIGHT).unwrap();
        let corridor = Corridor::new(left, right);
        assert_eq!(corridor.left().len(), 4);
        assert!(!corridor.right().is_empty());
        assert!(corridor.contains(1.9, 2.9));
        assert!(!corridor.contains(2.1, 2.9));
        assert!(corridor.contains_all(&[0.1, 1.9], &[0.1, 2.9]).unwrap());
        assert!(corridor.contains_all(&[0.1], &[]).is_err());
    }
}
