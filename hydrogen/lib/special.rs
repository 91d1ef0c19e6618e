//! Special functions needed for hydrogen-like wavefunctions.
//!
//! ```
//! use hydrogen::special::laguerre;
//!
//! // L₂⁽¹⁾(x) = (x² - 6x + 6) / 2
//! let x = 1.7;
//! let expected = (x * x - 6.0 * x + 6.0) / 2.0;
//! assert!((laguerre(2, 1.0, x) - expected).abs() < 1e-12);
//! ```

use std::f64::consts::PI;
use num_complex::Complex64 as C64;
use statrs::function::factorial as fact;

/// Compute `k!` as a floating-point number.
///
/// Overflows to `inf` for `k > 170`.
pub fn factorial(k: u32) -> f64 { fact::factorial(u64::from(k)) }

/// Evaluate the generalized Laguerre polynomial *L*<sub>*k*</sub><sup>(*α*)</sup>(*x*)
/// via the three-term recurrence
/// ```text
/// (j + 1) L[j + 1] = (2j + 1 + α - x) L[j] - (j + α) L[j - 1]
/// ```
/// starting from `L[0] = 1` and `L[1] = 1 + α - x`.
pub fn laguerre(k: u32, alpha: f64, x: f64) -> f64 {
    if k == 0 { return 1.0; }
    let mut lprev: f64 = 1.0;
    let mut lcur: f64 = 1.0 + alpha - x;
    let mut lnext: f64;
    for j in 1..k {
        let j = f64::from(j);
        lnext = ((2.0 * j + 1.0 + alpha - x) * lcur - (j + alpha) * lprev)
            / (j + 1.0);
        lprev = lcur;
        lcur = lnext;
    }
    lcur
}

/// Evaluate the associated Legendre function *P*<sub>*l*</sub><sup>*m*</sup>(*x*)
/// for `0 ≤ m ≤ l`, including the Condon-Shortley phase `(-1)^m`.
///
/// Returns `0` if `m > l`.
pub fn assoc_legendre(l: u32, m: u32, x: f64) -> f64 {
    if m > l { return 0.0; }
    // P_m^m = (-1)^m (2m - 1)!! (1 - x²)^(m/2)
    let s = (1.0 - x * x).max(0.0).sqrt();
    let mut pmm: f64 = 1.0;
    let mut odd: f64 = 1.0;
    for _ in 0..m {
        pmm *= -odd * s;
        odd += 2.0;
    }
    if l == m { return pmm; }
    // P_(m+1)^m = x (2m + 1) P_m^m
    let mut pprev = pmm;
    let mut pcur = x * f64::from(2 * m + 1) * pmm;
    let mut pnext: f64;
    for ll in (m + 2)..=l {
        let llf = f64::from(ll);
        let mf = f64::from(m);
        pnext = ((2.0 * llf - 1.0) * x * pcur - (llf + mf - 1.0) * pprev)
            / (llf - mf);
        pprev = pcur;
        pcur = pnext;
    }
    pcur
}

/// Compute the normalization of the spherical harmonic of degree `l` and order
/// `±m`:
/// ```text
///        ⎡ 2l + 1  (l - |m|)! ⎤ 1/2
/// K_lm = ⎢ ------  ---------- ⎥
///        ⎣   4π    (l + |m|)! ⎦
/// ```
pub fn harmonic_norm(l: u32, m: i32) -> f64 {
    let ma = m.unsigned_abs();
    (
        f64::from(2 * l + 1) / (4.0 * PI)
        * factorial(l - ma.min(l)) / factorial(l + ma)
    ).sqrt()
}

/// Evaluate the complex spherical harmonic *Y*<sub>*l*</sub><sup>*m*</sup>(*θ*, *φ*)
/// with the Condon-Shortley phase convention.
///
/// Here `theta` is the polar angle (measured from +*z*) and `phi` the
/// azimuthal angle (measured from +*x* in the *xy*-plane). Negative orders are
/// computed using `Y_l^(-m) = (-1)^m conj(Y_l^m)`.
///
/// Returns `0` if `|m| > l`.
pub fn spherical_harmonic(l: u32, m: i32, theta: f64, phi: f64) -> C64 {
    spherical_harmonic_normed(l, m, harmonic_norm(l, m), theta, phi)
}

// same as `spherical_harmonic`, but with the normalization constant supplied by
// the caller so that it can be reused over many points
pub(crate) fn spherical_harmonic_normed(
    l: u32,
    m: i32,
    norm: f64,
    theta: f64,
    phi: f64,
) -> C64
{
    let ma = m.unsigned_abs();
    if ma > l { return C64::from(0.0); }
    let ypos: C64
        = C64::from_polar(
            norm * assoc_legendre(l, ma, theta.cos()),
            f64::from(ma) * phi,
        );
    if m >= 0 {
        ypos
    } else if ma % 2 == 0 {
        ypos.conj()
    } else {
        -ypos.conj()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1.0);
        assert_eq!(factorial(1), 1.0);
        assert_eq!(factorial(5), 120.0);
        assert_eq!(factorial(7), 5040.0);
    }

    #[test]
    fn laguerre_low_orders() {
        for &x in [0.0_f64, 0.3, 2.5, 11.0].iter() {
            for &a in [0.0, 1.0, 3.0, 7.0].iter() {
                assert_eq!(laguerre(0, a, x), 1.0);
                assert_abs_diff_eq!(laguerre(1, a, x), 1.0 + a - x, epsilon = 1e-12);
                let l2 = (x * x - 2.0 * (a + 2.0) * x + (a + 1.0) * (a + 2.0)) / 2.0;
                assert_abs_diff_eq!(laguerre(2, a, x), l2, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn legendre_low_orders() {
        for &x in [-0.9_f64, -0.2, 0.0, 0.4, 1.0].iter() {
            let s: f64 = (1.0 - x * x).sqrt();
            assert_abs_diff_eq!(assoc_legendre(0, 0, x), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(assoc_legendre(1, 0, x), x, epsilon = 1e-12);
            assert_abs_diff_eq!(assoc_legendre(1, 1, x), -s, epsilon = 1e-12);
            assert_abs_diff_eq!(
                assoc_legendre(2, 0, x), 0.5 * (3.0 * x * x - 1.0), epsilon = 1e-12);
            assert_abs_diff_eq!(
                assoc_legendre(2, 1, x), -3.0 * x * s, epsilon = 1e-12);
            assert_abs_diff_eq!(
                assoc_legendre(2, 2, x), 3.0 * (1.0 - x * x), epsilon = 1e-12);
            assert_abs_diff_eq!(
                assoc_legendre(3, 3, x), -15.0 * s.powi(3), epsilon = 1e-12);
        }
        assert_eq!(assoc_legendre(1, 2, 0.5), 0.0);
    }

    #[test]
    fn harmonics_closed_forms() {
        let theta: f64 = 0.7;
        let phi: f64 = 1.3;
        let y00 = spherical_harmonic(0, 0, theta, phi);
        assert_abs_diff_eq!(y00.re, 0.5 / PI.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(y00.im, 0.0, epsilon = 1e-12);

        let y10 = spherical_harmonic(1, 0, theta, phi);
        assert_abs_diff_eq!(
            y10.re, (3.0 / (4.0 * PI)).sqrt() * theta.cos(), epsilon = 1e-12);

        // Y_1^(±1) = ∓ √(3/8π) sin θ e^(±iφ)
        let k = (3.0 / (8.0 * PI)).sqrt() * theta.sin();
        let y11 = spherical_harmonic(1, 1, theta, phi);
        let y1m1 = spherical_harmonic(1, -1, theta, phi);
        assert_abs_diff_eq!(y11.re, -k * phi.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(y11.im, -k * phi.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(y1m1.re, k * phi.cos(), epsilon = 1e-12);
        assert_abs_diff_eq!(y1m1.im, -k * phi.sin(), epsilon = 1e-12);
    }

    #[test]
    fn harmonic_magnitude_is_azimuth_independent() {
        for &(l, m) in [(2_u32, -2_i32), (3, 1), (3, -3)].iter() {
            let a = spherical_harmonic(l, m, 1.1, 0.0).norm();
            let b = spherical_harmonic(l, m, 1.1, 2.9).norm();
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
    }
}
