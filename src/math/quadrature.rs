//! Adaptive Gauss–Kronrod quadrature.
//!
//! Each interval is estimated with the 15-point Kronrod rule and the embedded
//! 7-point Gauss rule; their difference is the local error estimate. Intervals that
//! miss the tolerance are bisected, up to a fixed depth.
//!
//! The only integrands in this crate are piecewise cubic interpolants, which the
//! 15-point rule integrates exactly on any interval without an interior knot.

use crate::math::MathError;

/// Default absolute and relative tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1.49e-8;

/// Maximum bisection depth.
const MAX_DEPTH: u32 = 50;

/// Kronrod abscissae (non-negative half, descending); odd indices are the Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights for the nodes `XGK[1], XGK[3], XGK[5], XGK[7]`.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Definite integral of `f` over `[a, b]` with the default tolerance.
pub fn integrate<F>(f: F, a: f64, b: f64) -> Result<f64, MathError>
where
    F: Fn(f64) -> f64,
{
    integrate_with_tolerance(f, a, b, DEFAULT_TOLERANCE, DEFAULT_TOLERANCE)
}

/// Definite integral of `f` over `[a, b]`.
///
/// `b < a` yields the negated integral; `a == b` yields 0.
pub fn integrate_with_tolerance<F>(f: F, a: f64, b: f64, abs_tol: f64, rel_tol: f64) -> Result<f64, MathError>
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return Ok(0.0);
    }
    if b < a {
        return integrate_with_tolerance(f, b, a, abs_tol, rel_tol).map(|v| -v);
    }

    let (whole, err) = kronrod15(&f, a, b);
    if !whole.is_finite() {
        return Err(MathError::NonFiniteIntegrand { a, b });
    }
    if err <= abs_tol.max(rel_tol * whole.abs()) {
        return Ok(whole);
    }

    let value = adapt(&f, a, b, whole, abs_tol, rel_tol, 0);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::NonFiniteIntegrand { a, b })
    }
}

fn adapt<F>(f: &F, a: f64, b: f64, whole: f64, abs_tol: f64, rel_tol: f64, depth: u32) -> f64
where
    F: Fn(f64) -> f64,
{
    let mid = 0.5 * (a + b);
    let (left, left_err) = kronrod15(f, a, mid);
    let (right, right_err) = kronrod15(f, mid, b);
    let refined = left + right;

    let tol = abs_tol.max(rel_tol * refined.abs());
    if depth >= MAX_DEPTH || left_err + right_err <= tol || (refined - whole).abs() <= 1e-15 * refined.abs() {
        return refined;
    }

    // Split the tolerance between halves so the total stays within budget.
    adapt(f, a, mid, left, 0.5 * abs_tol, rel_tol, depth + 1)
        + adapt(f, mid, b, right, 0.5 * abs_tol, rel_tol, depth + 1)
}

/// Kronrod-15 estimate and its error relative to the embedded Gauss-7 estimate.
fn kronrod15<F>(f: &F, a: f64, b: f64) -> (f64, f64)
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    let value = kronrod * half;
    let err = ((kronrod - gauss) * half).abs();
    (value, err)
}
