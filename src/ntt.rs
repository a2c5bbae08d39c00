// This file implements the Number-Theoretic Transform, its inverse, and the base multiplication
// of NTT-domain polynomials modulo `X^256 + 1` for q = 3329.

use crate::helpers::{barrett_reduce, fqmul, is_in_range, ZETA_TABLE_MONT};
use crate::types::{R, T};
use crate::Q;


/// # Forward NTT.
/// Computes the Number-Theoretic Transform over an array of polynomials with a 7-layer
/// Cooley-Tukey butterfly network. The output is in bit-reversed order and each coefficient
/// is Barrett reduced.
///
/// **Input**: polynomials `w ∈ R_q` with coefficients of magnitude at most `q + 5` <br>
/// **Output**: `w_hat ∈ T_q` with coefficients in `[0, q]`
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn ntt<const KL: usize>(w: &[R; KL]) -> [T; KL] {
    debug_assert!(w.iter().all(|p| is_in_range(p, -(Q as i16) - 5, Q as i16 + 5)), "ntt: input out of range");
    let mut w_hat: [T; KL] = core::array::from_fn(|x| T(w[x].0));

    // for each element of w_hat
    for w_poly in &mut w_hat {
        let mut k = 1;
        let mut len = 128;

        while len >= 2 {
            let mut start = 0;
            while start < 256 {
                let zeta = ZETA_TABLE_MONT[k];
                k += 1;
                for j in start..(start + len) {
                    let t = fqmul(zeta, w_poly.0[j + len]);
                    w_poly.0[j + len] = w_poly.0[j] - t;
                    w_poly.0[j] += t;
                }
                start += 2 * len;
            }
            len >>= 1;
        }

        // each layer grows magnitudes by under q; bring it all back to [0, q]
        for c in &mut w_poly.0 {
            *c = barrett_reduce(*c);
        }
    }

    w_hat
}


/// # Inverse NTT.
/// Computes the inverse of the Number-Theoretic Transform with a 7-layer Gentleman-Sande
/// butterfly network and the final scaling by `F = 2^16/128 mod q`, which removes both the
/// `1/128` normalization and the Montgomery factor of `fqmul`. The output is in the normal
/// domain but not canonical; the caller must reduce.
///
/// **Input**: `w_hat ∈ T_q` with coefficients in `(-q, q]` <br>
/// **Output**: polynomials `w ∈ R_q` with coefficients in `(-q, q)`
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn inv_ntt<const KL: usize>(w_hat: &[T; KL]) -> [R; KL] {
    const F: i16 = 512;
    let mut w_out: [R; KL] = core::array::from_fn(|x| R(w_hat[x].0));
    debug_assert!(w_out.iter().all(|p| is_in_range(p, -(Q as i16) + 1, Q as i16)), "inv_ntt: input out of range");

    // for each element of w_out
    for w_poly in &mut w_out {
        let mut k = 127;
        let mut len = 2;

        while len <= 128 {
            let mut start = 0;
            while start < 256 {
                let zeta = ZETA_TABLE_MONT[k];
                k -= 1;
                for j in start..(start + len) {
                    let t = w_poly.0[j];
                    w_poly.0[j] = barrett_reduce(t + w_poly.0[j + len]);
                    w_poly.0[j + len] -= t;
                    w_poly.0[j + len] = fqmul(zeta, w_poly.0[j + len]);
                }
                start += 2 * len;
            }
            len <<= 1;
        }

        for c in &mut w_poly.0 {
            *c = fqmul(*c, F);
        }
    }

    w_out
}


/// Multiplication of two degree-one polynomials modulo `X^2 - zeta`, Montgomery scaled:
/// returns `(a0 + a1·X)(b0 + b1·X) · 2^-16`. Each output coefficient is in `(-2q, 2q)`.
#[inline(always)]
#[allow(clippy::inline_always)]
fn base_mul(a: [i16; 2], b: [i16; 2], zeta: i16) -> [i16; 2] {
    let r0 = fqmul(fqmul(a[1], b[1]), zeta) + fqmul(a[0], b[0]);
    let r1 = fqmul(a[0], b[1]) + fqmul(a[1], b[0]);
    [r0, r1]
}


/// # Base-case multiplication of NTT-domain polynomials.
/// Multiplies `a_hat` and `b_hat` pairwise in the 128 quadratic factors of `X^256 + 1`. The
/// result carries a factor of `2^-16` (see `polyvec::pointwise_acc()`, which removes it after
/// accumulating) and coefficients in `(-2q, 2q)`.
pub(crate) fn multiply_ntts(a_hat: &T, b_hat: &T) -> T {
    let mut h_hat = T([0i16; 256]);
    for i in 0..64 {
        let zeta = ZETA_TABLE_MONT[64 + i];
        for (offset, z) in [(0, zeta), (2, -zeta)] {
            let n = 4 * i + offset;
            let r = base_mul([a_hat.0[n], a_hat.0[n + 1]], [b_hat.0[n], b_hat.0[n + 1]], z);
            h_hat.0[n..n + 2].copy_from_slice(&r);
        }
    }
    h_hat
}
