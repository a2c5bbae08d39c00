// This file implements the scalar modular reduction helpers plus the twiddle-factor table

use crate::types::R;
use crate::{Q, ZETA};


/// If the condition is not met, return an error message. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($msg);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


/// `q^-1 mod 2^16`, as a signed 16-bit value
const QINV: i16 = -3327;

/// Barrett multiplier `round(2^26 / q)`
const BARRETT_V: i32 = ((1 << 26) + Q / 2) / Q;

/// `R^2 mod q` with `R = 2^16`; `fqmul(a, MONT_R2)` lifts `a` by `R`
pub(crate) const MONT_R2: i16 = 1353;

/// Multiplier such that `(n * DIV_Q_M) >> 34 == n / q` for all `n < 2^23`
const DIV_Q_M: u64 = (1 << 34) / (Q as u64) + 1;


/// Ensure every coefficient of polynomial `w` is within `lo` to `hi` (inclusive)
pub(crate) fn is_in_range(w: &R, lo: i16, hi: i16) -> bool {
    w.0.iter().all(|&e| (lo..=hi).contains(&e))
}


/// Montgomery reduction: for `-q·2^15 <= a < q·2^15` returns `a·2^-16 mod q` in `(-q, q)`.
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_possible_truncation)]
pub(crate) const fn montgomery_reduce(a: i32) -> i16 {
    debug_assert!((a >= -(Q << 15)) && (a < (Q << 15)), "montgomery_reduce: input out of range");
    let u = (a as i16).wrapping_mul(QINV);
    let t = (a - (u as i32) * Q) >> 16;
    t as i16
}


/// Multiplication followed by Montgomery reduction, so the result carries a `2^-16` factor.
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_lossless)]
pub(crate) const fn fqmul(a: i16, b: i16) -> i16 { montgomery_reduce(a as i32 * b as i32) }


/// Barrett reduction: any `i16` maps to the congruent value in `[0, q]`.
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_possible_truncation, clippy::cast_lossless)]
pub(crate) const fn barrett_reduce(a: i16) -> i16 {
    let t = (BARRETT_V * a as i32) >> 26;
    (a as i32 - t * Q) as i16
}


/// Conditional subtraction of `q`: input in `[0, 2q)`, output in `[0, q)`. Branch-free.
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_possible_truncation)]
pub(crate) const fn csubq(a: i16) -> i16 {
    debug_assert!((a >= 0) && ((a as i32) < 2 * Q), "csubq: input out of range");
    let a = a - Q as i16;
    a + ((a >> 15) & Q as i16)
}


/// Full reduction of any `i16` into the canonical range `[0, q)`.
#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) const fn freeze(a: i16) -> i16 { csubq(barrett_reduce(a)) }


/// Constant-time `n / q` for `n < 2^23`, avoiding a hardware divide on secret data.
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_possible_truncation, clippy::cast_lossless)]
pub(crate) const fn div_q(n: u32) -> u32 {
    debug_assert!(n < (1 << 23), "div_q: input out of range");
    ((n as u64 * DIV_Q_M) >> 34) as u32
}


/// HAC Algorithm 14.76 Right-to-left binary exponentiation mod Q.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
const fn pow_mod_q(g: i32, e: u8) -> i32 {
    let g = g as i64;
    let mut result = 1;
    let mut s = g;
    let mut e = e;
    while e != 0 {
        if e & 1 != 0 {
            result = (result * s).rem_euclid(Q as i64);
        }
        e >>= 1;
        if e != 0 {
            s = (s * s).rem_euclid(Q as i64);
        }
    }
    result as i32
}


/// Twiddle factors `zeta^brv7(i) · 2^16 mod± q`, in bit-reversed order
#[allow(clippy::cast_possible_truncation)]
const fn gen_zeta_table_mont() -> [i16; 128] {
    let mut result = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        let z = (pow_mod_q(ZETA, (i as u8).reverse_bits() >> 1) as i64 * (1 << 16)).rem_euclid(Q as i64);
        let z = if z > (Q as i64) / 2 { z - Q as i64 } else { z };
        result[i] = z as i16;
        i += 1;
    }
    result
}

pub(crate) static ZETA_TABLE_MONT: [i16; 128] = gen_zeta_table_mont();
