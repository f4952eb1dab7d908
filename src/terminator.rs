//! # Terminator lookup table
//!
//! A phase is drawn on a unit disk by overlapping it with a second circle: the part of the disk
//! outside that circle is the lit crescent (or, mirrored, the dark one). For an illuminated
//! fraction `f`, the second circle has radius `X` and its center sits at distance `Y` from the
//! disk center, both in units of the disk radius, where `Y` solves
//!
//! ```text
//! E(Y) = π/2 − (1 + Y²)(π/2 − atan Y) + Y
//! e(Y) = E(Y) / π = f
//! X    = √(1 + Y²)
//! ```
//!
//! `e` grows from 0 at `Y = 0` toward 1/2 as `Y → ∞`, so both ratios grow without bound as the
//! fraction approaches one half, where the terminator becomes a straight chord. That limit is
//! left to the renderer; the table stops at 49 %.
//!
//! Solving for `Y` is done once, offline, by [`solve_terminator`]. The result ships as the
//! constant [`TERMINATOR_TABLE`] at 1 % resolution and [`sample_terminator`] only interpolates.

use roots::{find_root_brent, SimpleConvergency};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::astro_errors::AstroError;

/// Rows per unit of fraction.
const TABLE_RESOLUTION: f64 = 100.0;

/// Index of the last row, f = 0.49.
const LAST_ROW: usize = 49;

/// Bound on the bracket search; `e(Y)` is dominated by rounding well before this.
const MAX_OFFSET: f64 = 1e12;

/// `(X, Y)` for f = 0.00, 0.01, …, 0.49.
///
/// Row 0 is the exact limit of a vanishing phase; rows 1 to 49 come from [`solve_terminator`].
pub const TERMINATOR_TABLE: [(f64, f64); LAST_ROW + 1] = [
    (1.0, 0.0),
    (1.0001264814647446, 0.015905311284291686),
    (1.0005189337402591, 0.03222012993060587),
    (1.0011982171783806, 0.048968051637451174),
    (1.0021871516206686, 0.06617466942530834),
    (1.0035107408330763, 0.08386779457783522),
    (1.0051964277809602, 0.10207770777012642),
    (1.0072743857507385, 0.12083744531198773),
    (1.009777851272342, 0.14018312637471164),
    (1.012743505951352, 0.16015432821699316),
    (1.016211915733023, 0.1807945178311014),
    (1.0202280378583408, 0.20215155016046837),
    (1.0248418079201134, 0.2242782451798807),
    (1.0301088220954107, 0.2472330587902724),
    (1.0360911329638598, 0.27108086580637636),
    (1.0428581815090696, 0.2958938774973281),
    (1.0504878931939985, 0.32175272142930744),
    (1.0590679727352954, 0.34874771809095517),
    (1.0686974408266425, 0.37698039740736555),
    (1.0794884671868006, 0.4065653093776057),
    (1.0915685687681047, 0.4376321975385822),
    (1.1050832609056231, 0.4703286229157285),
    (1.1201992742182008, 0.504823151171758),
    (1.137108483445354, 0.5413092490650724),
    (1.1560327393280962, 0.5800100812903362),
    (1.1772298557397427, 0.6211844599191252),
    (1.201001088286194, 0.6651342827314064),
    (1.2277005574908786, 0.712213913696871),
    (1.2577472344081826, 0.7628421236805372),
    (1.291640341854016, 0.8175174448932325),
    (1.329979365717774, 0.8768381339991165),
    (1.3734903737872333, 0.9415284418891412),
    (1.423061094014364, 1.0124736427667433),
    (1.4797883581433555, 1.0907674293343232),
    (1.54504331980744, 1.177777084206343),
    (1.6205627413815187, 1.2752347230035666),
    (1.7085793839129613, 1.3853676447544148),
    (1.8120125561567502, 1.5110888470469628),
    (1.9347539168320464, 1.6562828015459634),
    (2.0821091481231906, 1.8262471094291368),
    (2.2615046139555925, 2.0283991517801505),
    (2.483665107641235, 2.2734538409465337),
    (2.7646748994875305, 2.577484684698706),
    (3.1298053942811994, 2.9657514740907898),
    (3.6211704566041885, 3.4803556536341205),
    (4.314568156014041, 4.197082126059771),
    (5.361585189118706, 5.267503748472997),
    (7.115910254367549, 7.045294794982906),
    (10.638587756721908, 10.591484761707079),
    (21.234794228552296, 21.211234898726616),
];

/// Shape of the terminator circle for one illuminated fraction.
///
/// `f` and `1 − f` give the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminatorSample {
    /// Radius of the terminator circle over the disk radius, X
    pub radius_ratio: f64,
    /// Center offset of the terminator circle over the disk radius, Y
    pub offset_ratio: f64,
}

/// Area fraction `e(Y)` of the unit disk cut off by a circle of radius `√(1 + Y²)` at
/// distance `Y`.
pub fn illuminated_fraction_for_offset(y: f64) -> f64 {
    (FRAC_PI_2 - (1.0 + y * y) * (FRAC_PI_2 - y.atan()) + y) / PI
}

/// Solve `e(Y) = f` for `f` in [0, 0.5).
///
/// The root is bracketed by doubling an upper bound from 1, then refined with Brent's method.
///
/// Return
/// ----------
/// * `(X, Y)`, or [`AstroError::InvalidParameter`] outside [0, 0.5), or
///   [`AstroError::RootFinding`] if the solver does not converge.
pub fn solve_terminator(fraction: f64) -> Result<(f64, f64), AstroError> {
    if !(0.0..0.5).contains(&fraction) {
        return Err(AstroError::InvalidParameter(format!(
            "terminator fraction {fraction} is outside [0, 0.5)"
        )));
    }
    if fraction == 0.0 {
        return Ok((1.0, 0.0));
    }

    let residual = |y: f64| illuminated_fraction_for_offset(y) - fraction;

    let mut upper = 1.0;
    while residual(upper) < 0.0 && upper < MAX_OFFSET {
        upper *= 2.0;
    }

    let mut convergency = SimpleConvergency {
        eps: 1e-12,
        max_iter: 100,
    };
    let y = find_root_brent(0.0, upper, &residual, &mut convergency)
        .map_err(|e| AstroError::RootFinding(e.to_string()))?;

    Ok(((1.0 + y * y).sqrt(), y))
}

/// Recompute [`TERMINATOR_TABLE`] from the solver.
pub fn terminator_table() -> Result<Vec<(f64, f64)>, AstroError> {
    (0..=LAST_ROW)
        .map(|i| solve_terminator(i as f64 / TABLE_RESOLUTION))
        .collect()
}

/// Terminator circle for an illuminated fraction, by table interpolation.
///
/// The fraction is clamped to [0, 1] (NaN reads as 0) and fractions above one half are
/// mirrored, `f` and `1 − f` having the same shape. Between rows the ratios are interpolated
/// linearly; from 49 % to 51 % the last row is returned unchanged.
pub fn sample_terminator(fraction: f64) -> TerminatorSample {
    let clamped = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    if clamped != fraction {
        log::trace!("terminator fraction {fraction} clamped to {clamped}");
    }

    let folded = clamped.min(1.0 - clamped);
    let position = folded * TABLE_RESOLUTION;
    let index = position.floor() as usize;

    let (radius_ratio, offset_ratio) = if index >= LAST_ROW {
        TERMINATOR_TABLE[LAST_ROW]
    } else {
        let t = position - index as f64;
        let (x0, y0) = TERMINATOR_TABLE[index];
        let (x1, y1) = TERMINATOR_TABLE[index + 1];
        (x0 + t * (x1 - x0), y0 + t * (y1 - y0))
    };

    TerminatorSample {
        radius_ratio,
        offset_ratio,
    }
}
