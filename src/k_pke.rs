// This file implements the CPA-secure public key encryption scheme: key generation, encryption
// and decryption, plus the expansion of serialized keys into their precomputed forms.

use crate::encodings::{ct_decode, ct_encode, pk_decode, pk_encode, sk_decode};
use crate::hashing::{gen_matrix, sample_noise_vec, Symmetric};
use crate::ntt::{inv_ntt, ntt};
use crate::polyvec::{pointwise_acc, vec_add, vec_csubq, vec_freeze, vec_reduce};
use crate::types::{PrivateKey, PublicKey, R, T};
use crate::MSG_LEN;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;


/// # Key generation.
/// Draws the 32-byte seed `d` from `rng` and continues with `key_gen_internal()`.
///
/// # Errors
/// Returns an error when the random number generator fails; propagates the matrix generator.
pub(crate) fn key_gen<S: Symmetric, const K: usize, const NINETIES: bool>(
    rng: &mut impl CryptoRngCore, eta: u32,
) -> Result<(PublicKey<K, NINETIES>, PrivateKey<K, NINETIES>), &'static str> {
    let mut d = [0u8; 32];
    rng.try_fill_bytes(&mut d).map_err(|_| "KeyGen: random number generator failed")?;
    let res = key_gen_internal::<S, K, NINETIES>(eta, &d);
    d.zeroize();
    res
}


/// # Deterministic key generation from a seed.
/// `(ρ, σ) ← G(d)`, `A_hat ← GenMatrix(ρ)`, `s, e ← CBD(PRF(σ, ·))` with nonces `0..k` and
/// `k..2k`, then `t ← A·s + e` is computed through the NTT domain and held canonical.
///
/// **Input**:  `η`, seed `d ∈ B^32`. <br>
/// **Output**: Public key `(t, t_hat, ρ)` and private key `s_hat`.
///
/// # Errors
/// Propagates the rejection-sampling bound of the matrix generator.
#[allow(clippy::cast_possible_truncation, clippy::similar_names)]
pub(crate) fn key_gen_internal<S: Symmetric, const K: usize, const NINETIES: bool>(
    eta: u32, d: &[u8; 32],
) -> Result<(PublicKey<K, NINETIES>, PrivateKey<K, NINETIES>), &'static str> {
    let mut rho_sigma = S::hash_g(&[d]);
    let mut rho = [0u8; 32];
    rho.copy_from_slice(&rho_sigma[..32]);
    let mut sigma = [0u8; 32];
    sigma.copy_from_slice(&rho_sigma[32..]);
    rho_sigma.zeroize();

    let a_hat: [[T; K]; K] = gen_matrix::<S, K>(&rho, false)?;

    let mut s: [R; K] = sample_noise_vec::<S, K>(eta, &sigma, 0);
    let mut e: [R; K] = sample_noise_vec::<S, K>(eta, &sigma, K as u8);
    sigma.zeroize();

    let s_hat = ntt(&s);
    let mut as_hat: [T; K] = core::array::from_fn(|i| pointwise_acc(&a_hat[i], &s_hat));
    let mut a_s = inv_ntt(&as_hat);
    let mut t_raw = vec_add(&a_s, &e);
    let t = vec_csubq(&vec_reduce(&t_raw));
    let t_hat = ntt(&t);

    s.zeroize();
    e.zeroize();
    as_hat.zeroize();
    a_s.zeroize();
    t_raw.zeroize();

    Ok((PublicKey { rho, t, t_hat }, PrivateKey { s_hat }))
}


/// # Encryption with explicit coins.
/// `A_hat^T ← GenMatrix(ρ, transposed)`, `r, e1, e2 ← CBD(PRF(coins, ·))` with nonces `0..k`,
/// `k..2k` and `2k`, then `u ← A^T·r + e1` and `v ← t^T·r + e2 + Decode(m)`, compressed to `du`
/// and `dv` bits respectively. Identical inputs always give identical ciphertexts.
///
/// # Errors
/// Propagates the rejection-sampling bound of the matrix generator.
#[allow(clippy::cast_possible_truncation, clippy::similar_names)]
pub(crate) fn encrypt<S: Symmetric, const K: usize, const NINETIES: bool, const CT_LEN: usize>(
    eta: u32, du: u32, dv: u32, pk: &PublicKey<K, NINETIES>, msg: &[u8; MSG_LEN], coins: &[u8; 32],
) -> Result<[u8; CT_LEN], &'static str> {
    let at_hat: [[T; K]; K] = gen_matrix::<S, K>(&pk.rho, true)?;

    let mut r: [R; K] = sample_noise_vec::<S, K>(eta, coins, 0);
    let mut e1: [R; K] = sample_noise_vec::<S, K>(eta, coins, K as u8);
    let mut e2: [R; 1] = sample_noise_vec::<S, 1>(eta, coins, 2 * K as u8);
    let mut r_hat = ntt(&r);

    let mut atr_hat: [T; K] = core::array::from_fn(|i| pointwise_acc(&at_hat[i], &r_hat));
    let mut atr = inv_ntt(&atr_hat);
    let mut u = vec_freeze(&vec_add(&atr, &e1));

    let mut m = R::from_msg(msg);
    let mut tr = inv_ntt(&[pointwise_acc(&pk.t_hat, &r_hat)]);
    let mut v = tr[0].add(&e2[0]).add(&m).reduce();

    let ct = ct_encode::<K, CT_LEN>(du, dv, &u, &v);

    r.zeroize();
    e1.zeroize();
    e2.zeroize();
    r_hat.zeroize();
    atr_hat.zeroize();
    atr.zeroize();
    u.zeroize();
    m.zeroize();
    tr.zeroize();
    v.zeroize();

    Ok(ct)
}


/// # Randomized encryption.
/// Draws 32 bytes `x` from `rng` and derives `coins ← G(H(x) ‖ H(pk))[32..64]`, binding the
/// coins to the public key, then continues with `encrypt()`.
///
/// # Errors
/// Returns an error when the random number generator fails; propagates `encrypt()`.
pub(crate) fn encrypt_with_rng<
    S: Symmetric,
    const K: usize,
    const NINETIES: bool,
    const PK_LEN: usize,
    const CT_LEN: usize,
>(
    rng: &mut impl CryptoRngCore, eta: u32, du: u32, dv: u32, pk: &PublicKey<K, NINETIES>,
    msg: &[u8; MSG_LEN],
) -> Result<[u8; CT_LEN], &'static str> {
    let mut x = [0u8; 32];
    rng.try_fill_bytes(&mut x).map_err(|_| "Encrypt: random number generator failed")?;

    let pk_bytes: [u8; PK_LEN] = pk_encode(&pk.t, &pk.rho);
    let mut h_x = S::hash_h(&[&x]);
    let mut kr = S::hash_g(&[&h_x, &S::hash_h(&[&pk_bytes])]);
    let mut coins = [0u8; 32];
    coins.copy_from_slice(&kr[32..]);

    let res = encrypt::<S, K, NINETIES, CT_LEN>(eta, du, dv, pk, msg, &coins);

    x.zeroize();
    h_x.zeroize();
    kr.zeroize();
    coins.zeroize();

    res
}


/// # Decryption.
/// `m ← Encode(v − s^T·u)`, with `u` and `v` decompressed from the ciphertext. Every
/// ciphertext of the correct length decodes to some message, so this cannot fail.
#[allow(clippy::similar_names)]
pub(crate) fn decrypt<const K: usize, const NINETIES: bool, const CT_LEN: usize>(
    du: u32, dv: u32, sk: &PrivateKey<K, NINETIES>, ct: &[u8; CT_LEN],
) -> [u8; MSG_LEN] {
    let (u, v) = ct_decode::<K, CT_LEN>(du, dv, ct);
    let u_hat = ntt(&u);
    let mut su = inv_ntt(&[pointwise_acc(&sk.s_hat, &u_hat)]);
    let mut mp = v.sub(&su[0]);
    let msg = mp.to_msg();
    su.zeroize();
    mp.zeroize();
    msg
}


/// Deserializes a public key and precomputes the NTT of `t` used by every encryption.
///
/// # Errors
/// Returns an error on a non-canonical coefficient.
pub(crate) fn expand_public<const K: usize, const NINETIES: bool, const PK_LEN: usize>(
    pk: &[u8; PK_LEN],
) -> Result<PublicKey<K, NINETIES>, &'static str> {
    let (t, rho) = pk_decode::<K, PK_LEN>(pk)?;
    let t_hat = ntt(&t);
    Ok(PublicKey { rho, t, t_hat })
}


/// Deserializes a private key.
///
/// # Errors
/// Returns an error on a non-canonical coefficient.
pub(crate) fn expand_private<const K: usize, const NINETIES: bool, const SK_LEN: usize>(
    sk: &[u8; SK_LEN],
) -> Result<PrivateKey<K, NINETIES>, &'static str> {
    let s_hat = sk_decode::<K, SK_LEN>(sk)?;
    Ok(PrivateKey { s_hat })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::encodings::sk_encode;
    use crate::hashing::Shake;
    use crate::Q;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_key_gen_deterministic() {
        let d = [0x42u8; 32];
        let (pk1, sk1) = key_gen_internal::<Shake, 3, false>(2, &d).unwrap();
        let (pk2, sk2) = key_gen_internal::<Shake, 3, false>(2, &d).unwrap();
        assert_eq!(pk_encode::<3, 1184>(&pk1.t, &pk1.rho), pk_encode::<3, 1184>(&pk2.t, &pk2.rho));
        assert_eq!(sk_encode::<3, 1152>(&sk1.s_hat), sk_encode::<3, 1152>(&sk2.s_hat));
        assert!(pk1.t.iter().all(|p| p.0.iter().all(|&c| (0..Q as i16).contains(&c))));

        let (pk3, _) = key_gen_internal::<Shake, 3, false>(2, &[0x43u8; 32]).unwrap();
        assert_ne!(pk1.rho, pk3.rho);
    }

    #[test]
    fn test_key_gen_public_vector() {
        // t is the canonical A·s + e, rebuilt here from the same seeds
        let d = [0x24u8; 32];
        let (pk, _) = key_gen_internal::<Shake, 2, false>(2, &d).unwrap();
        let g = Shake::hash_g(&[&d]);
        assert_eq!(pk.rho, g[..32]);
        let sigma: [u8; 32] = g[32..].try_into().unwrap();
        let s: [R; 2] = sample_noise_vec::<Shake, 2>(2, &sigma, 0);
        let e: [R; 2] = sample_noise_vec::<Shake, 2>(2, &sigma, 2);
        let a_hat = gen_matrix::<Shake, 2>(&pk.rho, false).unwrap();
        let s_hat = ntt(&s);
        for i in 0..2 {
            let a_s = inv_ntt(&[pointwise_acc(&a_hat[i], &s_hat)]);
            assert_eq!(pk.t[i].0, a_s[0].add(&e[i]).freeze().0);
        }
    }

    #[test]
    fn test_decryption_noise_margin() {
        // v - s^T·u must land within q/4 of the encoded message on every coefficient
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(55);
        for _i in 0..20 {
            let (pk, sk) = key_gen::<Shake, 2, false>(&mut rng, 2).unwrap();
            let msg: [u8; 32] = rng.gen();
            let coins: [u8; 32] = rng.gen();
            let ct = encrypt::<Shake, 2, false, 736>(2, 10, 3, &pk, &msg, &coins).unwrap();
            let (u, v) = ct_decode::<2, 736>(10, 3, &ct);
            let su = inv_ntt(&[pointwise_acc(&sk.s_hat, &ntt(&u))]);
            let noisy = v.sub(&su[0]).freeze();
            let m = R::from_msg(&msg);
            for (a, b) in noisy.0.iter().zip(m.0.iter()) {
                let diff = (i32::from(*a) - i32::from(*b)).rem_euclid(Q);
                assert!(diff.min(Q - diff) < Q / 4);
            }
            assert_eq!(decrypt::<2, false, 736>(10, 3, &sk, &ct), msg);
        }
    }

    #[test]
    fn test_encrypt_with_rng_binds_coins() {
        let (pk, sk) = key_gen_internal::<Shake, 2, false>(2, &[1u8; 32]).unwrap();
        let msg = [0xA5u8; 32];
        let mut rng1 = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let ct1 = encrypt_with_rng::<Shake, 2, false, 800, 736>(&mut rng1, 2, 10, 3, &pk, &msg).unwrap();
        let ct2 = encrypt_with_rng::<Shake, 2, false, 800, 736>(&mut rng2, 2, 10, 3, &pk, &msg).unwrap();
        assert_eq!(ct1, ct2);

        // the raw random bytes are not used as coins directly
        let mut raw = [0u8; 32];
        rand_chacha::ChaCha8Rng::seed_from_u64(7).fill(&mut raw);
        let direct = encrypt::<Shake, 2, false, 736>(2, 10, 3, &pk, &msg, &raw).unwrap();
        assert_ne!(ct1, direct);
        assert_eq!(decrypt::<2, false, 736>(10, 3, &sk, &ct1), msg);
    }

    #[test]
    fn test_expand_public_matches_key_gen() {
        let (pk, _) = key_gen_internal::<Shake, 4, false>(2, &[9u8; 32]).unwrap();
        let bytes: [u8; 1568] = pk_encode(&pk.t, &pk.rho);
        let epk = expand_public::<4, false, 1568>(&bytes).unwrap();
        assert_eq!(epk.rho, pk.rho);
        for k in 0..4 {
            assert_eq!(epk.t[k].0, pk.t[k].0);
            assert_eq!(epk.t_hat[k].0, pk.t_hat[k].0);
        }
    }
}
