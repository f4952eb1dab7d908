//! # Rotations and direction vectors
//!
//! A small rotation value type shared by the pole-orientation, libration and shadow-geometry
//! code, together with the spherical ↔ Cartesian helpers they all need.
//!
//! [`Rotation`] wraps a [`nalgebra::Rotation3`] and always denotes an **active** rotation of
//! vectors in a fixed frame: `r.apply(&v)` returns the rotated vector. A change of basis by an
//! angle `α` about an axis is therefore `Rotation::about_axis(axis, -α)`.
//!
//! Composition reads left to right: `a.compose(&b)` applies `a` first, then `b`.

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::angles::clamp_unit;
use crate::constants::{Degree, Radian, DPI};

/// Principal axis of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// An orthonormal, right-handed 3-D rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation(Rotation3<f64>);

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rotation {
    pub fn identity() -> Self {
        Rotation(Rotation3::identity())
    }

    /// Rotation of `angle` radians about a principal axis, counter-clockwise when looking from
    /// the tip of the axis toward the origin.
    pub fn about_axis(axis: Axis, angle: Radian) -> Self {
        let axis = match axis {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        };
        Rotation(Rotation3::from_axis_angle(&axis, angle))
    }

    /// The smallest rotation carrying the direction of `a` onto the direction of `b`.
    ///
    /// Anti-parallel inputs get a half-turn about an arbitrary perpendicular axis. A zero
    /// input has no direction and yields the identity.
    pub fn rotate_a_to_b(a: &Vector3<f64>, b: &Vector3<f64>) -> Self {
        if let Some(r) = Rotation3::rotation_between(a, b) {
            return Rotation(r);
        }
        if a.norm() == 0.0 || b.norm() == 0.0 {
            return Self::identity();
        }

        // anti-parallel: any axis perpendicular to `a` works
        let helper = if a.x.abs() < a.y.abs() {
            Vector3::x()
        } else {
            Vector3::y()
        };
        match Unit::try_new(a.cross(&helper), 0.0) {
            Some(axis) => Rotation(Rotation3::from_axis_angle(&axis, std::f64::consts::PI)),
            None => Self::identity(),
        }
    }

    /// Apply `self` first, then `then`.
    pub fn compose(&self, then: &Rotation) -> Self {
        Rotation(then.0 * self.0)
    }

    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.0 * v
    }

    pub fn inverse(&self) -> Self {
        Rotation(self.0.inverse())
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        self.0.matrix()
    }
}

/// Unit vector pointing at spherical coordinates (longitude, latitude) in radians.
pub fn unit_vector(lon: Radian, lat: Radian) -> Vector3<f64> {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Unit vector for spherical coordinates given in degrees.
pub fn unit_vector_deg(lon: Degree, lat: Degree) -> Vector3<f64> {
    unit_vector(lon.to_radians(), lat.to_radians())
}

/// Convert a Cartesian vector into (longitude, latitude, norm).
///
/// Returns
/// --------
/// * `lon` in radians in [0, 2π)
/// * `lat` in radians in [−π/2, π/2]
/// * the Euclidean norm
///
/// A zero vector maps to `(0, 0, 0)`; along the polar axis the longitude is 0.
pub fn to_spherical(v: &Vector3<f64>) -> (Radian, Radian, f64) {
    let norm = v.norm();
    if norm == 0.0 {
        return (0.0, 0.0, norm);
    }

    let lat = clamp_unit(v.z / norm).asin();
    let lon = v.y.atan2(v.x);
    let lon = if lon < 0.0 { lon + DPI } else { lon };
    (lon, lat, norm)
}

/// Local sky basis at a direction: unit vectors toward celestial north and toward east.
///
/// Both are tangent to the sphere at `(lon, lat)`. At the poles the east vector is still
/// taken along increasing longitude, and north follows from the cross product.
pub fn tangent_basis(lon: Radian, lat: Radian) -> (Vector3<f64>, Vector3<f64>) {
    let (sin_lon, cos_lon) = lon.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let east = Vector3::new(-sin_lon, cos_lon, 0.0);
    (north, east)
}

/// Position angle (degrees, from north through east, in (−180, 180]) of a tangent direction
/// seen at the sky position `at`.
///
/// The direction does not need to be tangent: its radial component is ignored.
pub fn position_angle_of(direction: &Vector3<f64>, at: &Vector3<f64>) -> Degree {
    let (lon, lat, _) = to_spherical(at);
    let (north, east) = tangent_basis(lon, lat);
    crate::angles::wrap_180(direction.dot(&east).atan2(direction.dot(&north)).to_degrees())
}
