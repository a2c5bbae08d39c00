// This file implements the symmetric primitives (XOF, PRF, G and H) for both the SHAKE and
// the 90s families, the matrix generator and the noise-vector sampler.

use crate::conversion::sample_cbd;
use crate::helpers::ensure;
use crate::types::{R, T, R0, T0};
use crate::Q;
use sha2::Digest;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Sha3_256, Sha3_512, Shake128, Shake256};
use zeroize::Zeroize;
#[cfg(feature = "kyber-90s")]
use zeroize::ZeroizeOnDrop;


/// Total XOF output a single matrix entry may consume before sampling is abandoned
const GEN_MATRIX_MAX_BYTES: usize = 2688;

/// Largest XOF block across the primitive families
const MAX_XOF_BLOCK_BYTES: usize = 168;


/// The four symmetric primitives the scheme consumes. Implementations are stateless; each
/// call creates and owns its own absorb/squeeze state.
pub(crate) trait Symmetric {
    /// Bytes produced per XOF squeeze; must be even and divide `GEN_MATRIX_MAX_BYTES`
    const XOF_BLOCK_BYTES: usize;

    /// Squeezing side of the XOF
    type Xof: XofReader;

    /// XOF seeded with `seed ‖ x ‖ y`
    fn xof(seed: &[u8; 32], x: u8, y: u8) -> Self::Xof;

    /// PRF keyed with `key` and a one-byte `nonce`, filling `out`
    fn prf(key: &[u8; 32], nonce: u8, out: &mut [u8]);

    /// 64-byte hash G over the concatenation of `v`
    fn hash_g(v: &[&[u8]]) -> [u8; 64];

    /// 32-byte hash H over the concatenation of `v`
    fn hash_h(v: &[&[u8]]) -> [u8; 32];
}


/// SHAKE128 XOF, SHAKE256 PRF, SHA3-512 G and SHA3-256 H
pub(crate) struct Shake;

impl Symmetric for Shake {
    const XOF_BLOCK_BYTES: usize = 168;
    type Xof = sha3::Shake128Reader;

    fn xof(seed: &[u8; 32], x: u8, y: u8) -> Self::Xof {
        let mut hasher = Shake128::default();
        hasher.update(seed);
        hasher.update(&[x, y]);
        hasher.finalize_xof()
    }

    fn prf(key: &[u8; 32], nonce: u8, out: &mut [u8]) {
        let mut hasher = Shake256::default();
        hasher.update(key);
        hasher.update(&[nonce]);
        hasher.finalize_xof().read(out);
    }

    fn hash_g(v: &[&[u8]]) -> [u8; 64] {
        let mut hasher = Sha3_512::new();
        for b in v {
            Digest::update(&mut hasher, b);
        }
        let mut out = [0u8; 64];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    fn hash_h(v: &[&[u8]]) -> [u8; 32] {
        let mut hasher = Sha3_256::new();
        for b in v {
            Digest::update(&mut hasher, b);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}


/// AES-256-CTR XOF and PRF, SHA-512 G and SHA-256 H
#[cfg(feature = "kyber-90s")]
pub(crate) struct Aes90s;

/// AES-256 in counter mode as a byte stream: each 16-byte block is the encryption of the
/// 12-byte nonce followed by a 32-bit big-endian block counter that starts at zero. The key
/// schedule is wiped by `aes` itself on drop, the stream state by the `Drop` below.
#[cfg(feature = "kyber-90s")]
pub(crate) struct Aes256CtrReader {
    cipher: aes::Aes256,
    nonce: [u8; 12],
    counter: u32,
    block: [u8; 16],
    pos: usize,
}

#[cfg(feature = "kyber-90s")]
impl Aes256CtrReader {
    fn new(key: &[u8; 32], nonce: [u8; 12]) -> Self {
        use aes::cipher::KeyInit;
        let cipher = aes::Aes256::new(key.as_slice().into());
        Self { cipher, nonce, counter: 0, block: [0u8; 16], pos: 16 }
    }

    fn refill(&mut self) {
        use aes::cipher::BlockEncrypt;
        let mut input = [0u8; 16];
        input[0..12].copy_from_slice(&self.nonce);
        input[12..16].copy_from_slice(&self.counter.to_be_bytes());
        let mut block = aes::Block::clone_from_slice(&input);
        self.cipher.encrypt_block(&mut block);
        self.block.copy_from_slice(&block);
        self.counter = self.counter.wrapping_add(1);
        self.pos = 0;
    }
}

#[cfg(feature = "kyber-90s")]
impl XofReader for Aes256CtrReader {
    fn read(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            if self.pos == 16 {
                self.refill();
            }
            *byte = self.block[self.pos];
            self.pos += 1;
        }
    }
}

#[cfg(feature = "kyber-90s")]
impl Drop for Aes256CtrReader {
    fn drop(&mut self) {
        self.block.zeroize();
        self.nonce.zeroize();
        self.counter.zeroize();
        self.pos.zeroize();
    }
}

#[cfg(feature = "kyber-90s")]
impl ZeroizeOnDrop for Aes256CtrReader {}

#[cfg(feature = "kyber-90s")]
impl Symmetric for Aes90s {
    const XOF_BLOCK_BYTES: usize = 64;
    type Xof = Aes256CtrReader;

    fn xof(seed: &[u8; 32], x: u8, y: u8) -> Self::Xof {
        let mut nonce = [0u8; 12];
        nonce[0] = x;
        nonce[1] = y;
        Aes256CtrReader::new(seed, nonce)
    }

    fn prf(key: &[u8; 32], nonce: u8, out: &mut [u8]) {
        let mut expanded = [0u8; 12];
        expanded[0] = nonce;
        Aes256CtrReader::new(key, expanded).read(out);
    }

    fn hash_g(v: &[&[u8]]) -> [u8; 64] {
        let mut hasher = sha2::Sha512::new();
        for b in v {
            Digest::update(&mut hasher, b);
        }
        let mut out = [0u8; 64];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    fn hash_h(v: &[&[u8]]) -> [u8; 32] {
        let mut hasher = sha2::Sha256::new();
        for b in v {
            Digest::update(&mut hasher, b);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }
}


/// # Uniform sampling of an NTT-domain polynomial.
/// Squeezes the XOF a block at a time, reading little-endian 16-bit windows masked to 12 bits
/// and keeping those below `q`. Operates on public data only.
///
/// **Input**: A seed `ρ` and the two domain bytes. <br>
/// **Output**: `a_hat ∈ T_q` with canonical coefficients.
///
/// # Errors
/// Returns an error if `GEN_MATRIX_MAX_BYTES` of XOF output did not yield 256 coefficients.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn rej_uniform<S: Symmetric>(rho: &[u8; 32], x: u8, y: u8) -> Result<T, &'static str> {
    debug_assert!(S::XOF_BLOCK_BYTES <= MAX_XOF_BLOCK_BYTES, "rej_uniform: XOF block too large");
    let mut xof = S::xof(rho, x, y);
    let mut a_hat = T0;
    let mut block = [0u8; MAX_XOF_BLOCK_BYTES];
    let mut j = 0;
    let mut consumed = 0;

    while j < 256 {
        ensure!(consumed < GEN_MATRIX_MAX_BYTES, "Matrix generation exceeded the rejection sampling bound");
        let block = &mut block[..S::XOF_BLOCK_BYTES];
        xof.read(block);
        consumed += block.len();

        for pair in block.chunks_exact(2) {
            let val = u16::from_le_bytes([pair[0], pair[1]]) & 0x0FFF;
            if (val < Q as u16) && (j < 256) {
                a_hat.0[j] = val as i16;
                j += 1;
            }
        }
    }

    Ok(a_hat)
}


/// # Matrix generation.
/// Expands `ρ` into the `K×K` matrix `A_hat`, directly in the NTT domain. Entry `(i, j)` is
/// seeded with domain bytes `(j, i)`, or `(i, j)` when `transposed`, so the transposed matrix
/// comes from the same seed.
///
/// # Errors
/// Propagates the rejection-sampling bound from `rej_uniform()`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn gen_matrix<S: Symmetric, const K: usize>(
    rho: &[u8; 32], transposed: bool,
) -> Result<[[T; K]; K], &'static str> {
    let mut a_hat = [[T0; K]; K];
    for (i, row) in a_hat.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            let (x, y) = if transposed { (i, j) } else { (j, i) };
            *entry = rej_uniform::<S>(rho, x as u8, y as u8)?;
        }
    }
    Ok(a_hat)
}


/// # Noise vector sampling.
/// Samples `K` CBD polynomials from `PRF(sigma, nonce0 + k)`. The PRF output is wiped after use.
///
/// **Input**: `η ∈ {2, 3, 4, 5}`, the noise seed, and the first nonce. <br>
/// **Output**: `K` polynomials with coefficients in `[q - η, q + η]`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn sample_noise_vec<S: Symmetric, const K: usize>(eta: u32, sigma: &[u8; 32], nonce0: u8) -> [R; K] {
    let mut buf = [0u8; 5 * 64];
    let mut r = [R0; K];
    for (k, poly) in r.iter_mut().enumerate() {
        let buf = &mut buf[..64 * eta as usize];
        S::prf(sigma, nonce0 + k as u8, buf);
        *poly = sample_cbd(eta, buf);
    }
    buf.zeroize();
    r
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_matrix_zero_seed_shake() {
        let a_hat = gen_matrix::<Shake, 2>(&[0u8; 32], false).unwrap();
        assert_eq!(a_hat[0][0].0[..6], [217, 3227, 340, 2890, 2764, 2458]);
        assert_eq!(a_hat[0][1].0[..6], [1389, 724, 2572, 2480, 298, 2758]);
        assert_eq!(a_hat[1][0].0[..6], [3236, 4, 1037, 991, 1943, 1471]);
        assert_eq!(a_hat[1][1].0[..6], [1956, 960, 127, 1145, 1315, 1811]);
        let sum: i64 = a_hat.iter().flatten().flat_map(|t| t.0.iter()).map(|&c| i64::from(c)).sum();
        assert_eq!(sum, 1_668_201);
        assert!(a_hat.iter().flatten().all(|t| t.0.iter().all(|&c| (0..Q as i16).contains(&c))));
    }

    #[cfg(feature = "kyber-90s")]
    #[test]
    fn test_gen_matrix_zero_seed_aes() {
        let a_hat = gen_matrix::<Aes90s, 2>(&[0u8; 32], false).unwrap();
        assert_eq!(a_hat[0][0].0[..6], [1500, 2240, 162, 2441, 2221, 1186]);
        assert_eq!(a_hat[0][1].0[..6], [1362, 2291, 2232, 837, 1471, 828]);
        assert_eq!(a_hat[1][0].0[..6], [1576, 2151, 2421, 968, 3230, 557]);
        assert_eq!(a_hat[1][1].0[..6], [2120, 542, 2845, 1551, 52, 1000]);
        let sum: i64 = a_hat.iter().flatten().flat_map(|t| t.0.iter()).map(|&c| i64::from(c)).sum();
        assert_eq!(sum, 1_726_101);
    }

    #[test]
    fn test_gen_matrix_transpose() {
        let rho = [0x5Au8; 32];
        let a_hat = gen_matrix::<Shake, 3>(&rho, false).unwrap();
        let a_hat_t = gen_matrix::<Shake, 3>(&rho, true).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(a_hat[i][j].0, a_hat_t[j][i].0);
            }
        }
        // and the entries really differ from each other
        assert_ne!(a_hat[0][1].0, a_hat[1][0].0);
    }

    #[test]
    fn test_prf_known_bytes() {
        let mut out = [0u8; 8];
        Shake::prf(&[0u8; 32], 0, &mut out);
        assert_eq!(out, [0xc0, 0x3f, 0xcc, 0x81, 0xe7, 0x36, 0x09, 0x87]);
    }

    #[cfg(feature = "kyber-90s")]
    #[test]
    fn test_aes_ctr_known_bytes() {
        // first block is AES-256(0^32, 0^16), the FIPS-197 style all-zero answer
        let mut out = [0u8; 8];
        Aes90s::prf(&[0u8; 32], 0, &mut out);
        assert_eq!(out, [0xdc, 0x95, 0xc0, 0x78, 0xa2, 0x40, 0x89, 0x89]);

        // stream crosses a block boundary and is independent of read granularity
        let key: [u8; 32] = core::array::from_fn(|i| i as u8);
        let mut whole = [0u8; 20];
        Aes90s::xof(&key, 1, 2).read(&mut whole);
        assert_eq!(whole[..4], [0xf7, 0x95, 0x79, 0x55]);
        assert_eq!(whole[16..], [0x48, 0x2d, 0x81, 0xb5]);
        let mut reader = Aes90s::xof(&key, 1, 2);
        let mut pieces = [0u8; 20];
        for chunk in pieces.chunks_mut(3) {
            reader.read(chunk);
        }
        assert_eq!(pieces, whole);
    }

    #[cfg(feature = "kyber-90s")]
    #[test]
    fn test_aes_state_wiped_on_drop() {
        fn wiped_on_drop<Z: ZeroizeOnDrop>() {}
        wiped_on_drop::<aes::Aes256>();
        wiped_on_drop::<Aes256CtrReader>();
    }

    // An XOF that only ever produces values above q
    struct Stuck;
    struct StuckReader;

    impl XofReader for StuckReader {
        fn read(&mut self, buffer: &mut [u8]) { buffer.iter_mut().for_each(|b| *b = 0xFF); }
    }

    impl Symmetric for Stuck {
        const XOF_BLOCK_BYTES: usize = 168;
        type Xof = StuckReader;

        fn xof(_seed: &[u8; 32], _x: u8, _y: u8) -> Self::Xof { StuckReader }

        fn prf(_key: &[u8; 32], _nonce: u8, out: &mut [u8]) { out.iter_mut().for_each(|b| *b = 0xFF); }

        fn hash_g(_v: &[&[u8]]) -> [u8; 64] { [0u8; 64] }

        fn hash_h(_v: &[&[u8]]) -> [u8; 32] { [0u8; 32] }
    }

    #[test]
    fn test_gen_matrix_bounded() {
        assert!(gen_matrix::<Stuck, 2>(&[0u8; 32], false).is_err());
    }

    #[test]
    fn test_noise_vec_nonces() {
        let sigma = [7u8; 32];
        let e: [R; 2] = sample_noise_vec::<Shake, 2>(2, &sigma, 0);
        let e_shifted: [R; 1] = sample_noise_vec::<Shake, 1>(2, &sigma, 1);
        assert_eq!(e[1].0, e_shifted[0].0);
        assert_ne!(e[0].0, e[1].0);
        let mut buf = [0u8; 128];
        Shake::prf(&sigma, 0, &mut buf);
        assert_eq!(e[0].0, sample_cbd(2, &buf).0);
    }
}
