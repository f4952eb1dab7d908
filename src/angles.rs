//! Angle normalisation helpers.
//!
//! Every angle handed to the rendering layer goes through one of these before it leaves the
//! crate, so that each public function can document a single output range.

use crate::constants::Degree;

/// Wrap an angle into the half-open interval (−180, 180].
///
/// Angles already in range are returned bit-for-bit. NaN and infinities come out as NaN.
#[inline]
pub fn wrap_180(angle: Degree) -> Degree {
    if angle > -180.0 && angle <= 180.0 {
        return angle;
    }
    let r = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if r <= -180.0 {
        r + 360.0
    } else {
        r
    }
}

/// Wrap an angle into [0, 360).
#[inline]
pub fn wrap_360(angle: Degree) -> Degree {
    if (0.0..360.0).contains(&angle) {
        return angle;
    }
    let r = angle.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Fold the angle between two undirected lines into [0, 90].
#[inline]
pub fn fold_90(angle: Degree) -> Degree {
    let r = angle.rem_euclid(180.0);
    if r > 90.0 {
        (180.0 - r).max(0.0)
    } else {
        r
    }
}

/// Clamp the argument of an `asin`/`acos` into [−1, 1].
///
/// Rounding can push a dot product of unit vectors slightly outside the domain.
#[inline]
pub(crate) fn clamp_unit(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod angles_test {
    use super::*;

    #[test]
    fn test_wrap_180() {
        assert_eq!(wrap_180(0.0), 0.0);
        assert_eq!(wrap_180(180.0), 180.0);
        assert_eq!(wrap_180(-180.0), 180.0);
        assert_eq!(wrap_180(190.0), -170.0);
        assert_eq!(wrap_180(-190.0), 170.0);
        assert_eq!(wrap_180(720.0 + 45.0), 45.0);
        assert_eq!(wrap_180(15.066_123_456_789), 15.066_123_456_789);
        assert!(wrap_180(f64::NAN).is_nan());
        assert!(wrap_180(f64::INFINITY).is_nan());
    }

    #[test]
    fn test_wrap_360() {
        assert_eq!(wrap_360(-10.0), 350.0);
        assert_eq!(wrap_360(360.0), 0.0);
        assert_eq!(wrap_360(725.0), 5.0);
    }

    #[test]
    fn test_fold_90() {
        assert_eq!(fold_90(30.0), 30.0);
        assert_eq!(fold_90(150.0), 30.0);
        assert_eq!(fold_90(-30.0), 30.0);
        assert_eq!(fold_90(210.0), 30.0);
        assert_eq!(fold_90(90.0), 90.0);
        assert_eq!(fold_90(180.0), 0.0);
    }
}
