use crate::error::VectorError;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

/// An immutable two-dimensional vector with `f64` coordinates.
///
/// Angles follow the heading convention used across the engine: `0` points
/// north (+y) and angles grow clockwise, so `PI/2` is east (+x), `PI` is
/// south and `3PI/2` is west.
///
/// No operation validates its inputs. NaN and infinite values flow through
/// ordinary floating-point arithmetic; the only reported failure is asking
/// the zero vector for a direction (see [`Vector2::normalized`]).
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    /// The null-vector (origin).
    pub const NULL: Vector2 = Vector2::new(0.0, 0.0);

    /// Creates a new Vector2.
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Unit vector pointing along `theta` (0 = north, clockwise).
    pub fn from_heading(theta: f64) -> Self {
        Vector2::new(theta.sin(), theta.cos())
    }

    /// Vector of length `magnitude` pointing along `theta`.
    pub fn from_polar(magnitude: f64, theta: f64) -> Self {
        Vector2::from_heading(theta).multiply(magnitude)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Adds another vector to this vector.
    pub fn add(&self, v: Vector2) -> Self {
        Vector2::new(self.x + v.x, self.y + v.y)
    }

    /// Adds every vector in `vectors` to this one. An empty slice returns `self`.
    pub fn add_all(&self, vectors: &[Vector2]) -> Self {
        self.add(Vector2::sum(vectors))
    }

    /// Component-wise sum of `vectors`, or [`Vector2::NULL`] when the slice is empty.
    pub fn sum(vectors: &[Vector2]) -> Self {
        vectors.iter().sum()
    }

    /// Scales the vector by a scalar value.
    pub fn multiply(&self, scalar: f64) -> Self {
        Vector2::new(self.x * scalar, self.y * scalar)
    }

    /// Subtracts `v` from this vector (`self - v`).
    pub fn subtract(&self, v: Vector2) -> Self {
        Vector2::new(self.x - v.x, self.y - v.y)
    }

    /// Euclidean magnitude of the vector.
    pub fn scalar(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle of the vector in `[0, 2PI)`, 0 = north, clockwise.
    ///
    /// The zero vector has no direction; it reports `0` (`atan2(0, 0)`)
    /// instead of failing.
    pub fn theta(&self) -> f64 {
        (self.x.atan2(self.y) + TAU) % TAU
    }

    /// Rotates the vector by `theta` radians with the standard rotation matrix
    /// `(x cos - y sin, x sin + y cos)`.
    ///
    /// In the x-east / y-north plane this turns counter-clockwise, which means
    /// a positive `theta` *decreases* [`Vector2::theta`]. Angles outside
    /// `[-2PI, 2PI]` are accepted and wrap periodically.
    pub fn rotate(&self, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Signed arc length swept by this radius vector when rotated by `theta`.
    pub fn arc_length(&self, theta: f64) -> f64 {
        self.scalar() * theta
    }

    /// Distance between the two points.
    pub fn distance(&self, v: Vector2) -> f64 {
        self.subtract(v).scalar()
    }

    /// Unit vector with the same direction as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::Degenerate`] for a vector of magnitude zero.
    pub fn normalized(&self) -> Result<Self, VectorError> {
        let scalar = self.scalar();
        if scalar == 0.0 {
            return Err(VectorError::Degenerate { operation: "normalized" });
        }
        Ok(self.multiply(1.0 / scalar))
    }

    /// Whether the point lies inside the inclusive box `[lx, ux] x [ly, uy]`.
    /// Inverted bounds contain nothing.
    pub fn is_contained(&self, lx: f64, ly: f64, ux: f64, uy: f64) -> bool {
        lx <= self.x && self.x <= ux && ly <= self.y && self.y <= uy
    }
}

/// Maps any finite angle into `[0, 2PI)`.
pub fn normalize_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Renders `<+x, +y>` with an explicit sign and six decimals. Negative zero
/// prints as `+0.000000`; NaN prints as `NaN` without a sign.
impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // -0.0 + 0.0 == +0.0
        write!(f, "<{:+.6}, {:+.6}>", self.x + 0.0, self.y + 0.0)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Vector2::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Vector2::new(-self.x, -self.y)
    }
}

impl Sum for Vector2 {
    fn sum<I: Iterator<Item = Vector2>>(iter: I) -> Self {
        iter.fold(Vector2::NULL, |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a Vector2> for Vector2 {
    fn sum<I: Iterator<Item = &'a Vector2>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
