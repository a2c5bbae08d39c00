use zeroize::{Zeroize, ZeroizeOnDrop};


// The `NINETIES` parameter is `true` for the AES/SHA-2 parameter sets. Keys of the two primitive
// families with the same dimension are distinct types and cannot be mixed up.


/// Correctly sized private key specific to the target security parameter set. <br>
/// Holds the secret vector in the NTT domain, which is also its serialized form.
///
/// Implements the [`crate::traits::Decrypter`] and [`crate::traits::SerDes`] traits.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey<const K: usize, const NINETIES: bool> {
    pub(crate) s_hat: [T; K],
}


/// Correctly sized public key specific to the target security parameter set. <br>
/// Carries the coefficient-domain vector for serialization, its precomputed NTT for
/// encryption, and the seed that regenerates the matrix.
///
/// Implements the [`crate::traits::Encrypter`] and [`crate::traits::SerDes`] traits.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PublicKey<const K: usize, const NINETIES: bool> {
    pub(crate) rho: [u8; 32],
    pub(crate) t: [R; K],
    pub(crate) t_hat: [T; K],
}


// Polynomial in the standard (coefficient) domain
#[derive(Clone, Copy, Zeroize)]
#[repr(align(8))]
pub(crate) struct R(pub(crate) [i16; 256]);
pub(crate) const R0: R = R([0i16; 256]);


// Polynomial in the NTT (evaluation) domain; never mixed with `R` without a transform
#[derive(Clone, Copy, Zeroize)]
#[repr(align(8))]
pub(crate) struct T(pub(crate) [i16; 256]);
pub(crate) const T0: T = T([0i16; 256]);
