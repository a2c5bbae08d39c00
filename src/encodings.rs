//! This file implements the byte layouts of public keys, private keys and ciphertexts

use crate::polyvec;
use crate::types::{R, T};
use crate::{POLY_BYTES, SYM_BYTES};


/// # Public key encoding.
/// Concatenates the 12-bit serialization of the coefficient-domain vector `t` with the
/// public seed `ρ`. Only used on key-generation output, so no untrusted input is involved.
///
/// **Input**:  `t ∈ R^k` (any `i16` range, frozen on output), `ρ ∈ B^32`. <br>
/// **Output**: Public key `pk ∈ B^{384·k + 32}`.
pub(crate) fn pk_encode<const K: usize, const PK_LEN: usize>(t: &[R; K], rho: &[u8; 32]) -> [u8; PK_LEN] {
    debug_assert_eq!(PK_LEN, K * POLY_BYTES + SYM_BYTES, "pk_encode: bad pk/config size");
    let mut pk = [0u8; PK_LEN];
    polyvec::to_bytes(t, &mut pk[..K * POLY_BYTES]);
    pk[K * POLY_BYTES..].copy_from_slice(rho);
    pk
}


/// # Public key decoding.
/// Reverses `pk_encode()`. Used for deserialization of untrusted input.
///
/// **Input**:  Public key `pk ∈ B^{384·k + 32}`. <br>
/// **Output**: `t ∈ R^k` with canonical coefficients and `ρ ∈ B^32`.
///
/// # Errors
/// Returns an error when any coefficient of `t` decodes to a value `>= q`.
pub(crate) fn pk_decode<const K: usize, const PK_LEN: usize>(
    pk: &[u8; PK_LEN],
) -> Result<([R; K], [u8; 32]), &'static str> {
    debug_assert_eq!(PK_LEN, K * POLY_BYTES + SYM_BYTES, "pk_decode: bad pk/config size");
    let t = polyvec::try_from_bytes(&pk[..K * POLY_BYTES])?;
    let mut rho = [0u8; 32];
    rho.copy_from_slice(&pk[K * POLY_BYTES..]);
    Ok((t, rho))
}


/// # Private key encoding.
/// The 12-bit serialization of the NTT-domain secret vector.
pub(crate) fn sk_encode<const K: usize, const SK_LEN: usize>(s_hat: &[T; K]) -> [u8; SK_LEN] {
    debug_assert_eq!(SK_LEN, K * POLY_BYTES, "sk_encode: bad sk/config size");
    let mut sk = [0u8; SK_LEN];
    polyvec::ntt_to_bytes(s_hat, &mut sk);
    sk
}


/// # Private key decoding.
/// Reverses `sk_encode()`. Used for deserialization of untrusted input.
///
/// # Errors
/// Returns an error when any coefficient decodes to a value `>= q`.
pub(crate) fn sk_decode<const K: usize, const SK_LEN: usize>(sk: &[u8; SK_LEN]) -> Result<[T; K], &'static str> {
    debug_assert_eq!(SK_LEN, K * POLY_BYTES, "sk_decode: bad sk/config size");
    polyvec::try_ntt_from_bytes(sk)
}


/// # Ciphertext encoding.
/// The `du`-bit compression of `u` followed by the `dv`-bit compression of `v`.
///
/// **Input**:  `u ∈ R^k`, `v ∈ R` (any `i16` range), compression widths `du`, `dv`. <br>
/// **Output**: Ciphertext `ct ∈ B^{32·(k·du + dv)}`.
pub(crate) fn ct_encode<const K: usize, const CT_LEN: usize>(du: u32, dv: u32, u: &[R; K], v: &R) -> [u8; CT_LEN] {
    let split = K * 32 * du as usize;
    debug_assert_eq!(CT_LEN, split + 32 * dv as usize, "ct_encode: bad ct/config size");
    let mut ct = [0u8; CT_LEN];
    polyvec::compress(u, du, &mut ct[..split]);
    v.compress(dv, &mut ct[split..]);
    ct
}


/// # Ciphertext decoding.
/// Reverses `ct_encode()` up to the compression rounding. Every byte string of the correct
/// length decodes, so this cannot fail.
pub(crate) fn ct_decode<const K: usize, const CT_LEN: usize>(du: u32, dv: u32, ct: &[u8; CT_LEN]) -> ([R; K], R) {
    let split = K * 32 * du as usize;
    debug_assert_eq!(CT_LEN, split + 32 * dv as usize, "ct_decode: bad ct/config size");
    let u = polyvec::decompress(&ct[..split], du);
    let v = R::decompress(&ct[split..], dv);
    (u, v)
}
