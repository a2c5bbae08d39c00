// This file implements the conversions between polynomials and byte strings: fixed-width bit
// packing, lossy coefficient compression, and the centered binomial noise sampler.

use crate::helpers::{div_q, freeze, is_in_range};
use crate::types::{R, R0};
use crate::Q;


/// # Fixed-width bit packing.
/// Encodes the 256 coefficients of `w` into `bits`-wide little-endian fields, least
/// significant bit first. This function is not exposed to unvalidated input.
///
/// **Input**:  `w ∈ R` with all coefficients in `[0, 2^bits)`, `1 <= bits <= 12`. <br>
/// **Output**: A byte string of length `32·bits`.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) fn bit_pack(w: &R, bits: u32, bytes_out: &mut [u8]) {
    debug_assert!((1..=12).contains(&bits), "bit_pack: bits out of range");
    debug_assert!(is_in_range(w, 0, ((1u32 << bits) - 1) as i16), "bit_pack: w out of range");
    debug_assert_eq!(w.0.len() * bits as usize, bytes_out.len() * 8, "bit_pack: bad output size");

    let mut temp = 0u32; // To insert new values on the left/MSB and pop output values from the right/LSB
    let mut byte_index = 0; // Current output byte position
    let mut bit_index = 0; // Number of bits accumulated in temp

    for coeff in w.0 {
        // Shift and drop into empty/upper part of temp
        temp |= (coeff as u32) << bit_index;
        bit_index += bits;
        // while we have at least 'bytes' worth of bits in temp
        while bit_index > 7 {
            // drop a byte into the output
            bytes_out[byte_index] = temp.to_le_bytes()[0];
            temp >>= 8;
            byte_index += 1;
            bit_index -= 8;
        }
    }
}


/// # Fixed-width bit unpacking.
/// Reverses `bit_pack()`. Every field decodes to a value in `[0, 2^bits)`; callers that need
/// tighter bounds (e.g. `< q` for 12-bit keys) check the result themselves.
///
/// **Input**:  A byte string `v` of length `32·bits`, `1 <= bits <= 12`. <br>
/// **Output**: `w ∈ R` with all coefficients in `[0, 2^bits)`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn bit_unpack(v: &[u8], bits: u32) -> R {
    debug_assert!((1..=12).contains(&bits), "bit_unpack: bits out of range");
    debug_assert_eq!(v.len() * 8, 256 * bits as usize, "bit_unpack: bad input size");

    let mut w_out = R0;
    let mut temp = 0u32;
    let mut r_index = 0;
    let mut bit_index = 0;
    let mask = (1u32 << bits) - 1;

    for byte in v {
        temp |= u32::from(*byte) << bit_index;
        bit_index += 8;
        while bit_index >= bits {
            w_out.0[r_index] = (temp & mask) as i16;
            temp >>= bits;
            r_index += 1;
            bit_index -= bits;
        }
    }

    w_out
}


/// Compresses a single coefficient to `d` bits: `round(2^d · x / q) mod 2^d` on the frozen value.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub(crate) fn compress_coeff(x: i16, d: u32) -> i16 {
    debug_assert!((1..=11).contains(&d), "compress_coeff: d out of range");
    let x = freeze(x) as u32;
    (div_q((x << d) + (Q as u32) / 2) & ((1 << d) - 1)) as i16
}


/// Decompresses a single `d`-bit value: `round(q · y / 2^d)`, giving a coefficient in `[0, q)`.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub(crate) fn decompress_coeff(y: i16, d: u32) -> i16 {
    debug_assert!((1..=11).contains(&d), "decompress_coeff: d out of range");
    debug_assert!((y >= 0) & (i32::from(y) < (1 << d)), "decompress_coeff: y out of range");
    ((y as u32 * Q as u32 + (1 << (d - 1))) >> d) as i16
}


/// # Centered binomial distribution sampler.
/// Maps `η·N/4` uniform bytes to a polynomial whose coefficients are `a - b`, where `a` and
/// `b` are each the sum of `η` independent bits; stored as `a + q - b` so every coefficient
/// is non-negative. Each group of 4 coefficients consumes exactly `η` little-endian bytes.
///
/// **Input**:  `η ∈ {2, 3, 4, 5}` and a byte string of length `64·η`. <br>
/// **Output**: `r ∈ R` with coefficients in `[q - η, q + η]`.
#[allow(clippy::cast_possible_truncation, clippy::many_single_char_names)]
pub(crate) fn sample_cbd(eta: u32, bytes: &[u8]) -> R {
    debug_assert!((2..=5).contains(&eta), "sample_cbd: eta out of range");
    debug_assert_eq!(bytes.len(), 64 * eta as usize, "sample_cbd: bad input size");
    let eta_usize = eta as usize;

    // One bit per eta-wide field, eight fields (four a/b pairs) per group
    let mask = (0..8).fold(0u64, |acc, m| acc | (1 << (eta * m)));
    let field = (1u64 << eta) - 1;
    let mut r = R0;

    for (i, chunk) in bytes.chunks_exact(eta_usize).enumerate() {
        let t = chunk.iter().rev().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        let d = (0..eta).fold(0u64, |acc, j| acc + ((t >> j) & mask));
        for k in 0..4 {
            let a = (d >> (2 * eta * k)) & field;
            let b = (d >> (2 * eta * k + eta)) & field;
            r.0[4 * i + k as usize] = (a as i16) + Q as i16 - (b as i16);
        }
    }

    r
}
