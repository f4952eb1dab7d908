//! Orientation of the Sun, the Moon and the planets on the observer's sky.
//!
//! Given an [`ephemeris::EphemerisProvider`], the crate computes the rotation a renderer
//! applies to a body so that its north pole points the right way relative to the horizon,
//! the Moon's optical libration, the Earth's shadow cone at the Moon's distance and the
//! shape of the lunar terminator.

pub mod angles;
pub mod astro_errors;
pub mod body;
pub mod constants;
pub mod coordinates;
pub mod earth_orientation;
pub mod ephemeris;
pub mod libration;
pub mod orientation;
pub mod pole;
pub mod rotation;
pub mod shadow;
pub mod terminator;
pub mod time;
