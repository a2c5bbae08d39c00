// This file implements the operations on vectors of K polynomials. The forward and inverse
// transforms of whole vectors are the array-generic functions in ntt.rs.

use crate::helpers::{barrett_reduce, fqmul, MONT_R2};
use crate::ntt::multiply_ntts;
use crate::types::{R, T, R0, T0};
use crate::POLY_BYTES;


/// Elementwise addition without reduction.
pub(crate) fn vec_add<const K: usize>(vec_a: &[R; K], vec_b: &[R; K]) -> [R; K] {
    core::array::from_fn(|k| vec_a[k].add(&vec_b[k]))
}

/// Barrett reduce every coefficient of every element into `[0, q]`.
pub(crate) fn vec_reduce<const K: usize>(vec_a: &[R; K]) -> [R; K] { vec_a.map(|p| p.reduce()) }

/// Conditionally subtract `q` from every coefficient, input `[0, 2q)`.
pub(crate) fn vec_csubq<const K: usize>(vec_a: &[R; K]) -> [R; K] { vec_a.map(|p| p.csubq()) }

/// Canonicalize every coefficient of every element into `[0, q)`.
pub(crate) fn vec_freeze<const K: usize>(vec_a: &[R; K]) -> [R; K] { vec_a.map(|p| p.freeze()) }


/// # Dot product in the NTT domain.
/// Computes `Σ a_hat[k] ∘ b_hat[k]` with `K` base multiplications accumulated unreduced, then
/// one pass that cancels the Montgomery factor and Barrett reduces. The result is the plain
/// (not Montgomery scaled) product.
///
/// **Input**: `a_hat`, `b_hat` with coefficients in `[0, q]` <br>
/// **Output**: `T` with coefficients in `[0, q]`
pub(crate) fn pointwise_acc<const K: usize>(a_hat: &[T; K], b_hat: &[T; K]) -> T {
    debug_assert!(K <= 4, "pointwise_acc: accumulator would overflow");
    let mut acc = T0;
    for (a, b) in a_hat.iter().zip(b_hat.iter()) {
        let prod = multiply_ntts(a, b);
        acc.0.iter_mut().zip(prod.0.iter()).for_each(|(x, y)| *x += *y);
    }
    T(acc.0.map(|c| barrett_reduce(fqmul(c, MONT_R2))))
}


/// Concatenated 12-bit serializations of the (frozen) elements of a coefficient-domain vector.
pub(crate) fn to_bytes<const K: usize>(vec_a: &[R; K], bytes_out: &mut [u8]) {
    debug_assert_eq!(bytes_out.len(), K * POLY_BYTES, "polyvec::to_bytes: bad output size");
    for (p, chunk) in vec_a.iter().zip(bytes_out.chunks_exact_mut(POLY_BYTES)) {
        p.to_bytes(chunk);
    }
}


/// Reverses `to_bytes()`.
///
/// # Errors
/// Returns an error when any coefficient decodes to a value `>= q`.
pub(crate) fn try_from_bytes<const K: usize>(bytes: &[u8]) -> Result<[R; K], &'static str> {
    debug_assert_eq!(bytes.len(), K * POLY_BYTES, "polyvec::try_from_bytes: bad input size");
    let mut vec_a = [R0; K]; // tricky to get `?` inside a closure
    for (p, chunk) in vec_a.iter_mut().zip(bytes.chunks_exact(POLY_BYTES)) {
        *p = R::try_from_bytes(chunk)?;
    }
    Ok(vec_a)
}


/// Concatenated 12-bit serializations of the (frozen) elements of an NTT-domain vector.
pub(crate) fn ntt_to_bytes<const K: usize>(vec_a: &[T; K], bytes_out: &mut [u8]) {
    debug_assert_eq!(bytes_out.len(), K * POLY_BYTES, "polyvec::ntt_to_bytes: bad output size");
    for (p, chunk) in vec_a.iter().zip(bytes_out.chunks_exact_mut(POLY_BYTES)) {
        p.to_bytes(chunk);
    }
}


/// Reverses `ntt_to_bytes()`.
///
/// # Errors
/// Returns an error when any coefficient decodes to a value `>= q`.
pub(crate) fn try_ntt_from_bytes<const K: usize>(bytes: &[u8]) -> Result<[T; K], &'static str> {
    debug_assert_eq!(bytes.len(), K * POLY_BYTES, "polyvec::try_ntt_from_bytes: bad input size");
    let mut vec_a = [T0; K];
    for (p, chunk) in vec_a.iter_mut().zip(bytes.chunks_exact(POLY_BYTES)) {
        *p = T::try_from_bytes(chunk)?;
    }
    Ok(vec_a)
}


/// Compresses every element to `d` bits and concatenates the `32·d`-byte blocks.
/// The input vector is not modified.
pub(crate) fn compress<const K: usize>(vec_a: &[R; K], d: u32, bytes_out: &mut [u8]) {
    debug_assert_eq!(bytes_out.len(), K * 32 * d as usize, "polyvec::compress: bad output size");
    for (p, chunk) in vec_a.iter().zip(bytes_out.chunks_exact_mut(32 * d as usize)) {
        p.compress(d, chunk);
    }
}


/// Reverses `compress()` up to rounding, with coefficients in `[0, q)`.
pub(crate) fn decompress<const K: usize>(bytes: &[u8], d: u32) -> [R; K] {
    debug_assert_eq!(bytes.len(), K * 32 * d as usize, "polyvec::decompress: bad input size");
    core::array::from_fn(|k| R::decompress(&bytes[k * 32 * d as usize..(k + 1) * 32 * d as usize], d))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::is_in_range;
    use crate::ntt::{inv_ntt, ntt};
    use crate::Q;
    use rand::{Rng, SeedableRng};

    // Schoolbook negacyclic multiply-accumulate: Σ a[k]·b[k] mod (X^256 + 1, q), computed
    // directly in the coefficient domain as the independent oracle for the NTT path.
    #[allow(clippy::cast_possible_truncation)]
    fn nega_mac<const K: usize>(a: &[R; K], b: &[R; K]) -> R {
        let mut acc = [0i64; 256];
        for k in 0..K {
            for i in 0..256 {
                for j in 0..256 {
                    let prod = i64::from(a[k].0[i]) * i64::from(b[k].0[j]);
                    if i + j < 256 {
                        acc[i + j] += prod;
                    } else {
                        acc[i + j - 256] -= prod;
                    }
                }
            }
        }
        R(acc.map(|c| c.rem_euclid(i64::from(Q)) as i16))
    }

    fn random_vec<const K: usize>(rng: &mut impl Rng, lo: i16, hi: i16) -> [R; K] {
        core::array::from_fn(|_| R(core::array::from_fn(|_| rng.gen_range(lo..=hi))))
    }

    fn check_against_oracle<const K: usize>(seed: u64) {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        for _i in 0..4 {
            let a: [R; K] = random_vec(&mut rng, 0, Q as i16 - 1);
            let b: [R; K] = random_vec(&mut rng, Q as i16 - 2, Q as i16 + 2); // noise shaped
            let via_ntt = inv_ntt(&[pointwise_acc(&ntt(&a), &ntt(&b))]);
            assert_eq!(via_ntt[0].freeze().0, nega_mac(&a, &b).0);
        }
    }

    #[test]
    fn test_pointwise_acc_matches_schoolbook() {
        check_against_oracle::<1>(1);
        check_against_oracle::<2>(2);
        check_against_oracle::<3>(3);
        check_against_oracle::<4>(4);
    }

    #[test]
    fn test_pointwise_acc_worst_case_range() {
        // all coefficients at q (largest Barrett output) in every slot
        let a = [T([Q as i16; 256]); 4];
        let r = pointwise_acc(&a, &a);
        assert!(is_in_range(&R(r.0), 0, Q as i16));
        assert!(r.0.iter().all(|&c| c == 0 || c == Q as i16));
    }

    #[test]
    fn test_vec_bytes_and_compress() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(9);
        let v: [R; 3] = random_vec(&mut rng, -(Q as i16), 2 * Q as i16 - 1);
        let mut bytes = [0u8; 3 * POLY_BYTES];
        to_bytes(&v, &mut bytes);
        let back: [R; 3] = try_from_bytes(&bytes).unwrap();
        for k in 0..3 {
            assert_eq!(back[k].0, v[k].freeze().0);
        }

        let v_hat = ntt(&vec_freeze(&v));
        ntt_to_bytes(&v_hat, &mut bytes);
        let back_hat: [T; 3] = try_ntt_from_bytes(&bytes).unwrap();
        assert_eq!(back_hat[2].0, R(v_hat[2].0).freeze().0);

        let mut cbytes = [0u8; 3 * 320];
        compress(&v, 10, &mut cbytes);
        let dv: [R; 3] = decompress(&cbytes, 10);
        let frozen = vec_freeze(&v);
        for k in 0..3 {
            for n in 0..256 {
                let diff = (i32::from(dv[k].0[n]) - i32::from(frozen[k].0[n])).rem_euclid(Q);
                assert!(diff.min(Q - diff) <= 2);
            }
        }
    }

    #[test]
    fn test_vec_add_reduce_csubq() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(10);
        let a: [R; 2] = random_vec(&mut rng, 0, Q as i16 - 1);
        let b: [R; 2] = random_vec(&mut rng, 0, Q as i16 - 1);
        let sum = vec_csubq(&vec_reduce(&vec_add(&a, &b)));
        for k in 0..2 {
            for n in 0..256 {
                assert_eq!(i32::from(sum[k].0[n]), (i32::from(a[k].0[n]) + i32::from(b[k].0[n])) % Q);
            }
        }
    }
}
