// This file implements the per-polynomial operations: arithmetic, canonicalization, 12-bit
// serialization, compression and message encoding.

use crate::conversion::{bit_pack, bit_unpack, compress_coeff, decompress_coeff};
use crate::helpers::{barrett_reduce, csubq, ensure, freeze, is_in_range};
use crate::types::{R, T};
use crate::{MSG_LEN, POLY_BYTES, Q};


impl R {
    /// Coefficient-wise addition without reduction; the caller reduces before relying on range.
    pub(crate) fn add(&self, other: &R) -> R { R(core::array::from_fn(|n| self.0[n] + other.0[n])) }

    /// Coefficient-wise subtraction without reduction; the caller reduces before relying on range.
    pub(crate) fn sub(&self, other: &R) -> R { R(core::array::from_fn(|n| self.0[n] - other.0[n])) }

    /// Barrett reduce every coefficient into `[0, q]`.
    pub(crate) fn reduce(&self) -> R { R(self.0.map(barrett_reduce)) }

    /// Conditionally subtract `q` from every coefficient; input `[0, 2q)`, output `[0, q)`.
    pub(crate) fn csubq(&self) -> R { R(self.0.map(csubq)) }

    /// Canonicalize every coefficient into `[0, q)`.
    pub(crate) fn freeze(&self) -> R { R(self.0.map(freeze)) }


    /// Serializes into 12-bit fields. A frozen copy is packed, `self` is untouched.
    pub(crate) fn to_bytes(self, bytes_out: &mut [u8]) {
        debug_assert_eq!(bytes_out.len(), POLY_BYTES, "R::to_bytes: bad output size");
        bit_pack(&self.freeze(), 12, bytes_out);
    }


    /// Deserializes 12-bit fields, rejecting non-canonical coefficients.
    ///
    /// # Errors
    /// Returns an error when a field decodes to a value `>= q`.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn try_from_bytes(bytes: &[u8]) -> Result<R, &'static str> {
        debug_assert_eq!(bytes.len(), POLY_BYTES, "R::try_from_bytes: bad input size");
        let r = bit_unpack(bytes, 12);
        ensure!(is_in_range(&r, 0, Q as i16 - 1), "Polynomial coefficient out of range");
        Ok(r)
    }


    /// Lossy compression of every coefficient to `d` bits, packed into `32·d` bytes.
    /// Works on a frozen copy, so any input range is accepted and `self` is untouched.
    pub(crate) fn compress(&self, d: u32, bytes_out: &mut [u8]) {
        debug_assert_eq!(bytes_out.len(), 32 * d as usize, "R::compress: bad output size");
        let c = R(self.0.map(|x| compress_coeff(x, d)));
        bit_pack(&c, d, bytes_out);
    }


    /// Reconstruction of a `d`-bit compressed polynomial, with coefficients in `[0, q)`.
    /// Every `d`-bit pattern is a valid input, so this cannot fail.
    pub(crate) fn decompress(bytes: &[u8], d: u32) -> R {
        debug_assert_eq!(bytes.len(), 32 * d as usize, "R::decompress: bad input size");
        R(bit_unpack(bytes, d).0.map(|y| decompress_coeff(y, d)))
    }


    /// Maps bit `j` of byte `i` of the message to coefficient `8i + j`, as `0` or `(q + 1)/2`.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn from_msg(msg: &[u8; MSG_LEN]) -> R {
        R(core::array::from_fn(|n| {
            let mask = -i16::from((msg[n / 8] >> (n % 8)) & 1);
            mask & ((Q as i16 + 1) / 2)
        }))
    }


    /// Decodes one bit per coefficient, 1 for coefficients closer to `q/2` than to `0`.
    /// Freezes first, so any coefficient range is accepted.
    pub(crate) fn to_msg(self) -> [u8; MSG_LEN] { self.freeze().to_msg_nofreeze() }


    /// As `to_msg()`, for callers that already hold canonical coefficients in `[0, q)`.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub(crate) fn to_msg_nofreeze(self) -> [u8; MSG_LEN] {
        debug_assert!(is_in_range(&self, 0, Q as i16 - 1), "R::to_msg_nofreeze: input not canonical");
        let mut msg = [0u8; MSG_LEN];
        for (n, &c) in self.0.iter().enumerate() {
            // compress_1 of an already canonical value
            msg[n / 8] |= (compress_coeff(c, 1) as u8) << (n % 8);
        }
        msg
    }
}


// The 12-bit layout is domain agnostic, so the NTT-domain forms reuse it.
impl T {
    /// Serializes into 12-bit fields. A frozen copy is packed, `self` is untouched.
    pub(crate) fn to_bytes(self, bytes_out: &mut [u8]) { R(self.0).to_bytes(bytes_out); }

    /// Deserializes 12-bit fields, rejecting non-canonical coefficients.
    ///
    /// # Errors
    /// Returns an error when a field decodes to a value `>= q`.
    pub(crate) fn try_from_bytes(bytes: &[u8]) -> Result<T, &'static str> {
        let r = R::try_from_bytes(bytes)?;
        Ok(T(r.0))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::R0;
    use rand::{Rng, SeedableRng};

    fn random_poly(rng: &mut impl Rng, lo: i16, hi: i16) -> R {
        R(core::array::from_fn(|_| rng.gen_range(lo..=hi)))
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        let mut bytes = [0u8; POLY_BYTES];
        for _i in 0..100 {
            let p = random_poly(&mut rng, 0, Q as i16 - 1);
            p.to_bytes(&mut bytes);
            assert_eq!(R::try_from_bytes(&bytes).unwrap().0, p.0);
        }
        // unreduced input serializes as its canonical form, leaving the input alone
        let p = random_poly(&mut rng, -2 * Q as i16, 2 * Q as i16);
        let before = p.0;
        p.to_bytes(&mut bytes);
        assert_eq!(p.0, before);
        assert_eq!(R::try_from_bytes(&bytes).unwrap().0, p.freeze().0);
    }

    #[test]
    fn test_from_bytes_rejects_non_canonical() {
        let mut bytes = [0u8; POLY_BYTES];
        bytes[0] = 0x01; // coefficient 0 = 0xD01 = 3329
        bytes[1] = 0x0D;
        assert!(R::try_from_bytes(&bytes).is_err());
        bytes[0] = 0x00; // 3328 is the largest canonical value
        assert_eq!(R::try_from_bytes(&bytes).unwrap().0[0], 3328);
        bytes[1] = 0xF0; // 0xFFF in the high nibble of coefficient 1
        bytes[2] = 0xFF;
        assert!(T::try_from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_add_sub_reduce() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(456);
        let a = random_poly(&mut rng, 0, Q as i16 - 1);
        let b = random_poly(&mut rng, 0, Q as i16 - 1);
        let sum = a.add(&b).reduce();
        let diff = sum.sub(&b).freeze();
        assert_eq!(diff.0, a.0);
        assert!(is_in_range(&a.add(&b).reduce(), 0, Q as i16));
        assert_eq!(a.add(&R([Q as i16; 256])).reduce().csubq().0, a.0);
    }

    #[test]
    fn test_msg_round_trip_with_noise() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(789);
        for _i in 0..50 {
            let msg: [u8; MSG_LEN] = rng.gen();
            let noise = random_poly(&mut rng, -(Q as i16) / 4 + 1, Q as i16 / 4 - 1);
            let p = R::from_msg(&msg);
            assert_eq!(p.to_msg(), msg);
            assert_eq!(p.to_msg_nofreeze(), msg);
            assert_eq!(p.add(&noise).to_msg(), msg);
        }
        assert_eq!(R::from_msg(&[0xFF; MSG_LEN]).0, [1665; 256]);
        assert_eq!(R::from_msg(&[0; MSG_LEN]).0, R0.0);
    }

    #[test]
    fn test_to_msg_thresholds() {
        // decodes to one exactly on [833, 2496]
        let mut p = R0;
        for (n, c) in [832i16, 833, 2496, 2497, 0, 1664, 3328, 1].iter().enumerate() {
            p.0[n] = *c;
        }
        assert_eq!(p.to_msg()[0], 0b0010_0110);
        assert_eq!(p.to_msg(), p.to_msg_nofreeze());
    }

    #[test]
    fn test_compress_round_trip() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(101);
        let mut bytes = [0u8; 32 * 11];
        for d in [3u32, 4, 5, 10, 11] {
            let p = random_poly(&mut rng, 0, Q as i16 - 1);
            p.compress(d, &mut bytes[..32 * d as usize]);
            let back = R::decompress(&bytes[..32 * d as usize], d);
            let bound = (Q + (1 << (d + 1)) - 1) / (1 << (d + 1));
            for (x, y) in p.0.iter().zip(back.0.iter()) {
                let diff = (i32::from(*y) - i32::from(*x)).rem_euclid(Q);
                assert!(diff.min(Q - diff) <= bound);
            }
        }
    }
}
