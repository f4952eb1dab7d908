//! # Constants and type definitions
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **type
//! aliases** shared by every component of the crate.
//!
//! ## Overview
//!
//! - Time-scale anchors (J2000.0, Julian century)
//! - Unit conversions (degrees ↔ radians, arcseconds ↔ degrees, AU ↔ km)
//! - Body radii used by the shadow geometry
//! - Numerical guards (cosine floor, minimum distance)
//!
//! All angles exchanged with the rendering layer are in **degrees** and all distances in
//! **kilometers**; radians only appear inside the numeric kernels.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// TT − TAI offset in seconds
pub const TT_MINUS_TAI: f64 = 32.184;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian Date of J2000.0 (2000-01-01 12:00:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → degrees
pub const DEG_PER_ARCSEC: f64 = 1.0 / 3600.0;

/// Earth equatorial radius in kilometers (WGS84)
pub const EARTH_RADIUS_KM: f64 = 6_378.137;

/// Earth polar radius in kilometers (WGS84)
pub const EARTH_POLAR_RADIUS_KM: f64 = 6_356.7523;

/// Moon mean radius in kilometers (IAU)
pub const MOON_RADIUS_KM: f64 = 1_737.4;

/// Sun nominal radius in kilometers (IAU 2015 B3)
pub const SUN_RADIUS_KM: f64 = 695_700.0;

/// Inclination of the mean lunar equator on the ecliptic
pub const MOON_EQUATOR_INCLINATION_DEG: f64 = 1.54242;

/// Floor applied to cosines before they are used as divisors (pole and zenith guards)
pub const COS_EPS: f64 = 1e-12;

/// Smallest distance accepted in a division, in kilometers
pub const MIN_DISTANCE_KM: f64 = 1.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Julian Date (days)
pub type JulianDay = f64;
/// Julian centuries since J2000.0
pub type JulianCenturies = f64;

/// The absolute time of a query. Every component takes its instant as a UTC-anchored epoch.
pub type Instant = hifitime::Epoch;
