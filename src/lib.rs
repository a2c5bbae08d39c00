#![no_std]
#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Almost all of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(let_underscore_drop, macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, single_use_lifetimes, trivial_casts)]
#![deny(trivial_numeric_casts, unreachable_pub, unsafe_op_in_unsafe_fn, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
#![deny(unused_qualifications, unused_results, variant_size_differences)]
//
#![doc = include_str!("../README.md")]


// Implements the CPA-secure public key encryption scheme underlying Kyber (round 2 dimensions),
// with both the SHAKE/SHA-3 primitives and the AES/SHA-2 ("90s") primitives.

// Functionality map
//
// Montgomery, Barrett, csubq, freeze, div_q; twiddle table   --> helpers.rs
// Bit packing, coefficient compression, CBD noise            --> conversion.rs
// Forward/inverse NTT, base multiplication                   --> ntt.rs
// Polynomial arithmetic, serialization, message encoding     --> poly.rs
// Vector arithmetic, NTT-domain dot product, vector formats  --> polyvec.rs
// XOF/PRF/G/H families, matrix generator, noise vectors      --> hashing.rs
// Key and ciphertext byte layouts                            --> encodings.rs
// Key generation, encryption, decryption, key expansion      --> k_pke.rs
// Parameter-set namespaces and byte-slice entry points       --> lib.rs
// Types are in types.rs, traits are in traits.rs...

// Note that debug_assert! statements enforce correct program construction and are not involved
// in any operational dataflow (so are good fuzz targets). The ensure! statements implement
// conservative dataflow validation and do not panic. Separately, functions are only generic
// over security parameters that are directly involved in memory allocation (on the stack);
// eta, du and dv are passed as plain arguments.

/// The `rand_core` types are re-exported so that users of kyber-pke do not
/// have to worry about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, Error as RngError, RngCore};

mod conversion;
mod encodings;
mod hashing;
mod helpers;
mod k_pke;
mod ntt;
mod poly;
mod polyvec;
mod types;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;

// Applies across all security parameter sets
const Q: i32 = 3329; // 13·2^8 + 1, so that X^256 + 1 splits into 128 quadratic factors
const ZETA: i32 = 17; // primitive 256-th root of unity mod q
const SYM_BYTES: usize = 32; // seeds, coins and hash outputs
const POLY_BYTES: usize = 384; // 256 coefficients at 12 bits each
const MSG_LEN: usize = 32; // one bit per coefficient


// This common functionality is injected into each security parameter set namespace, and is
// largely a lightweight wrapper into the k_pke functions.
macro_rules! functionality {
    () => {
        use crate::encodings;
        use crate::k_pke;
        use crate::traits::{Decrypter, Encrypter, KeyGen, SerDes};
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};


        // ----- 'EXTERNAL' DATA TYPES -----

        /// Empty struct to enable `KeyGen` trait objects across security parameter
        /// sets. Implements the [`crate::traits::KeyGen`] trait.
        #[derive(Zeroize, ZeroizeOnDrop)]
        pub struct KG();


        /// Private key specific to the target security parameter set.
        ///
        /// Implements the [`crate::traits::Decrypter`] and [`crate::traits::SerDes`] traits.
        // Note: #[derive(Zeroize, ZeroizeOnDrop)] is implemented on the underlying struct.
        pub type PrivateKey = crate::types::PrivateKey<K, NINETIES>;


        /// Public key specific to the target security parameter set that contains the
        /// precomputed NTT of its vector, which improves encryption performance.
        ///
        /// Implements the [`crate::traits::Encrypter`] and [`crate::traits::SerDes`] traits.
        // Note: #[derive(Zeroize, ZeroizeOnDrop)] is implemented on the underlying struct.
        pub type PublicKey = crate::types::PublicKey<K, NINETIES>;


        // Note: (public) Ciphertext is just a vanilla fixed-size byte array


        // ----- PRIMARY FUNCTIONS ---

        /// Generates a public-private key pair specific to this security parameter set.
        ///
        /// This function utilizes the **default OS** random number generator. It operates
        /// in constant-time relative to secret data (which specifically excludes the
        /// random number generator internals and the public seed that is rejection-sampled
        /// into the matrix).
        ///
        /// **Output**: Public key struct and private key struct.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        ///
        /// # Examples
        /// ```rust
        /// # use std::error::Error;
        /// # fn main() -> Result<(), Box<dyn Error>> {
        /// # #[cfg(all(feature = "kyber-512", feature = "default-rng"))] {
        /// use kyber_pke::kyber512; // Could also be kyber768 or kyber1024.
        /// use kyber_pke::traits::{Decrypter, Encrypter, SerDes};
        ///
        /// let message = [0x5Au8; 32];
        ///
        /// let (pk, sk) = kyber512::try_keygen()?; // Generate both public and secret keys
        /// let ct = pk.try_encrypt(&message)?; // Use the public key to encrypt a message
        /// assert_eq!(sk.decrypt(&ct), message); // Use the secret key to decrypt it
        /// # }
        /// # Ok(())}
        /// ```
        #[cfg(feature = "default-rng")]
        pub fn try_keygen() -> Result<(PublicKey, PrivateKey), &'static str> { KG::try_keygen() }


        /// Generates a public and private key pair specific to this security parameter set.
        ///
        /// This function utilizes the **provided** random number generator. It operates
        /// in constant-time relative to secret data (which specifically excludes the
        /// random number generator internals and the public seed that is rejection-sampled
        /// into the matrix).
        ///
        /// **Output**: Public key struct and private key struct.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        ///
        /// # Examples
        /// ```rust
        /// # use std::error::Error;
        /// # fn main() -> Result<(), Box<dyn Error>> {
        /// # #[cfg(feature = "kyber-512")] {
        /// use kyber_pke::kyber512; // Could also be kyber768 or kyber1024.
        /// use kyber_pke::traits::{Decrypter, Encrypter, SerDes};
        /// use rand_chacha::rand_core::SeedableRng;
        ///
        /// let message = [0x5Au8; 32];
        /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        ///
        /// let (pk, sk) = kyber512::try_keygen_with_rng(&mut rng)?; // Generate both public and secret keys
        /// let ct = pk.try_encrypt_with_rng(&mut rng, &message)?; // Use the public key to encrypt a message
        /// assert_eq!(sk.decrypt(&ct), message); // Use the secret key to decrypt it
        /// # }
        /// # Ok(())}
        /// ```
        pub fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<(PublicKey, PrivateKey), &'static str> {
            KG::try_keygen_with_rng(rng)
        }


        /// Encrypts a message under a serialized public key with explicit coins. Every buffer
        /// length is checked before any computation takes place.
        ///
        /// **Input**: `pk` of `PK_LEN` bytes, `msg` of 32 bytes, `coins` of 32 bytes. <br>
        /// **Output**: Ciphertext of `CT_LEN` bytes.
        ///
        /// # Errors
        /// Returns an error on a wrong buffer length or a malformed public key.
        pub fn try_encrypt_slices(pk: &[u8], msg: &[u8], coins: &[u8]) -> Result<[u8; CT_LEN], &'static str> {
            let pk: [u8; PK_LEN] = pk.try_into().map_err(|_| "Encrypt: public key has the wrong length")?;
            let mut msg: [u8; 32] = msg.try_into().map_err(|_| "Encrypt: message has the wrong length")?;
            let mut coins: [u8; 32] = coins.try_into().map_err(|_| "Encrypt: coins have the wrong length")?;
            let res = PublicKey::try_from_bytes(pk).and_then(|pk| pk.try_encrypt_with_coins(&msg, &coins));
            msg.zeroize();
            coins.zeroize();
            res
        }


        /// Decrypts a ciphertext under a serialized private key. Every buffer length is checked
        /// before any computation takes place.
        ///
        /// **Input**: `sk` of `SK_LEN` bytes, `ct` of `CT_LEN` bytes. <br>
        /// **Output**: The 32-byte message.
        ///
        /// # Errors
        /// Returns an error on a wrong buffer length or a malformed private key.
        pub fn try_decrypt_slices(sk: &[u8], ct: &[u8]) -> Result<[u8; 32], &'static str> {
            let mut sk_bytes: [u8; SK_LEN] = sk.try_into().map_err(|_| "Decrypt: private key has the wrong length")?;
            let ct: [u8; CT_LEN] = ct.try_into().map_err(|_| "Decrypt: ciphertext has the wrong length")?;
            let res = PrivateKey::try_from_bytes(sk_bytes).map(|sk| sk.decrypt(&ct));
            sk_bytes.zeroize();
            res
        }


        impl KeyGen for KG {
            type PrivateKey = PrivateKey;
            type PublicKey = PublicKey;

            fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<(PublicKey, PrivateKey), &'static str> {
                k_pke::key_gen::<Sym, K, NINETIES>(rng, ETA)
            }

            fn keygen_from_seed(d: &[u8; 32]) -> Result<(PublicKey, PrivateKey), &'static str> {
                k_pke::key_gen_internal::<Sym, K, NINETIES>(ETA, d)
            }
        }


        impl Encrypter for PublicKey {
            type Ciphertext = [u8; CT_LEN];

            fn try_encrypt_with_rng(
                &self, rng: &mut impl CryptoRngCore, msg: &[u8; 32],
            ) -> Result<Self::Ciphertext, &'static str> {
                k_pke::encrypt_with_rng::<Sym, K, NINETIES, PK_LEN, CT_LEN>(rng, ETA, DU, DV, self, msg)
            }

            fn try_encrypt_with_coins(&self, msg: &[u8; 32], coins: &[u8; 32]) -> Result<Self::Ciphertext, &'static str> {
                k_pke::encrypt::<Sym, K, NINETIES, CT_LEN>(ETA, DU, DV, self, msg, coins)
            }
        }


        impl Decrypter for PrivateKey {
            type Ciphertext = [u8; CT_LEN];

            fn decrypt(&self, ct: &Self::Ciphertext) -> [u8; 32] {
                k_pke::decrypt::<K, NINETIES, CT_LEN>(DU, DV, self, ct)
            }
        }


        // ----- SERIALIZATION AND DESERIALIZATION ---

        impl SerDes for PrivateKey {
            type ByteArray = [u8; SK_LEN];

            fn try_from_bytes(sk: Self::ByteArray) -> Result<Self, &'static str> {
                k_pke::expand_private::<K, NINETIES, SK_LEN>(&sk)
            }

            fn into_bytes(self) -> Self::ByteArray { encodings::sk_encode::<K, SK_LEN>(&self.s_hat) }
        }


        impl SerDes for PublicKey {
            type ByteArray = [u8; PK_LEN];

            fn try_from_bytes(pk: Self::ByteArray) -> Result<Self, &'static str> {
                k_pke::expand_public::<K, NINETIES, PK_LEN>(&pk)
            }

            fn into_bytes(self) -> Self::ByteArray { encodings::pk_encode::<K, PK_LEN>(&self.t, &self.rho) }
        }


    };
}


/// # Functionality for the **kyber512** security parameter set.
///
/// This includes specific sizes for the public key, secret key, and ciphertext along with a
/// number of internal constants. The kyber512 parameter set targets security category 1.
///
/// **1)** The basic usage is for a recipient to start with the [`kyber512::try_keygen`] function below to
/// generate both [`kyber512::PublicKey`] and [`kyber512::PrivateKey`] structs. The resulting
/// [`kyber512::PublicKey`] struct implements the [`traits::Encrypter`] trait which supplies
/// functions to encrypt 32-byte messages, such as [`traits::Encrypter::try_encrypt_with_rng()`].
///
/// **2)** Both of the `PrivateKey` and `PublicKey` structs implement the [`traits::SerDes`] trait.
/// The recipient utilizes the [`traits::SerDes::into_bytes()`] functions to serialize the structs
/// into byte-arrays for storage and/or transmission. Upon retrieval and/or receipt, the
/// [`traits::SerDes::try_from_bytes()`] functions deserialize the byte-arrays into structs.
///
/// **3)** Finally, the recipient uses the [`traits::Decrypter::decrypt()`] function implemented on the
/// [`kyber512::PrivateKey`] struct to recover the message from the `Ciphertext` byte array.
///
/// See the top-level [crate] documentation for example code that implements the above flow.
#[cfg(feature = "kyber-512")]
pub mod kyber512 {
    type Sym = crate::hashing::Shake;
    const NINETIES: bool = false;
    const K: usize = 2;
    const ETA: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 3;
    /// Private (secret) key length in bytes.
    pub const SK_LEN: usize = 768;
    /// Public key length in bytes.
    pub const PK_LEN: usize = 800;
    /// Ciphertext length in bytes.
    pub const CT_LEN: usize = 736;

    functionality!();
}


/// # Functionality for the **kyber768** security parameter set.
///
/// This includes specific sizes for the public key, secret key, and ciphertext along with a
/// number of internal constants. The kyber768 parameter set targets security category 3.
///
/// **1)** The basic usage is for a recipient to start with the [`kyber768::try_keygen`] function below to
/// generate both [`kyber768::PublicKey`] and [`kyber768::PrivateKey`] structs. The resulting
/// [`kyber768::PublicKey`] struct implements the [`traits::Encrypter`] trait which supplies
/// functions to encrypt 32-byte messages, such as [`traits::Encrypter::try_encrypt_with_rng()`].
///
/// **2)** Both of the `PrivateKey` and `PublicKey` structs implement the [`traits::SerDes`] trait.
/// The recipient utilizes the [`traits::SerDes::into_bytes()`] functions to serialize the structs
/// into byte-arrays for storage and/or transmission. Upon retrieval and/or receipt, the
/// [`traits::SerDes::try_from_bytes()`] functions deserialize the byte-arrays into structs.
///
/// **3)** Finally, the recipient uses the [`traits::Decrypter::decrypt()`] function implemented on the
/// [`kyber768::PrivateKey`] struct to recover the message from the `Ciphertext` byte array.
///
/// See the top-level [crate] documentation for example code that implements the above flow.
#[cfg(feature = "kyber-768")]
pub mod kyber768 {
    type Sym = crate::hashing::Shake;
    const NINETIES: bool = false;
    const K: usize = 3;
    const ETA: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;
    /// Private (secret) key length in bytes.
    pub const SK_LEN: usize = 1152;
    /// Public key length in bytes.
    pub const PK_LEN: usize = 1184;
    /// Ciphertext length in bytes.
    pub const CT_LEN: usize = 1088;

    functionality!();
}


/// # Functionality for the **kyber1024** security parameter set.
///
/// This includes specific sizes for the public key, secret key, and ciphertext along with a
/// number of internal constants. The kyber1024 parameter set targets security category 5.
///
/// **1)** The basic usage is for a recipient to start with the [`kyber1024::try_keygen`] function below to
/// generate both [`kyber1024::PublicKey`] and [`kyber1024::PrivateKey`] structs. The resulting
/// [`kyber1024::PublicKey`] struct implements the [`traits::Encrypter`] trait which supplies
/// functions to encrypt 32-byte messages, such as [`traits::Encrypter::try_encrypt_with_rng()`].
///
/// **2)** Both of the `PrivateKey` and `PublicKey` structs implement the [`traits::SerDes`] trait.
/// The recipient utilizes the [`traits::SerDes::into_bytes()`] functions to serialize the structs
/// into byte-arrays for storage and/or transmission. Upon retrieval and/or receipt, the
/// [`traits::SerDes::try_from_bytes()`] functions deserialize the byte-arrays into structs.
///
/// **3)** Finally, the recipient uses the [`traits::Decrypter::decrypt()`] function implemented on the
/// [`kyber1024::PrivateKey`] struct to recover the message from the `Ciphertext` byte array.
///
/// See the top-level [crate] documentation for example code that implements the above flow.
#[cfg(feature = "kyber-1024")]
pub mod kyber1024 {
    type Sym = crate::hashing::Shake;
    const NINETIES: bool = false;
    const K: usize = 4;
    const ETA: u32 = 2;
    const DU: u32 = 11;
    const DV: u32 = 5;
    /// Private (secret) key length in bytes.
    pub const SK_LEN: usize = 1536;
    /// Public key length in bytes.
    pub const PK_LEN: usize = 1568;
    /// Ciphertext length in bytes.
    pub const CT_LEN: usize = 1568;

    functionality!();
}


/// # Functionality for the **kyber512-90s** security parameter set.
///
/// Identical dimensions and sizes to [`kyber512`], with AES-256-CTR as the XOF and PRF and
/// SHA-256/SHA-512 as the hashes. Keys of the two variants are distinct types.
#[cfg(all(feature = "kyber-512", feature = "kyber-90s"))]
pub mod kyber512_90s {
    type Sym = crate::hashing::Aes90s;
    const NINETIES: bool = true;
    const K: usize = 2;
    const ETA: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 3;
    /// Private (secret) key length in bytes.
    pub const SK_LEN: usize = 768;
    /// Public key length in bytes.
    pub const PK_LEN: usize = 800;
    /// Ciphertext length in bytes.
    pub const CT_LEN: usize = 736;

    functionality!();
}


/// # Functionality for the **kyber768-90s** security parameter set.
///
/// Identical dimensions and sizes to [`kyber768`], with AES-256-CTR as the XOF and PRF and
/// SHA-256/SHA-512 as the hashes. Keys of the two variants are distinct types.
#[cfg(all(feature = "kyber-768", feature = "kyber-90s"))]
pub mod kyber768_90s {
    type Sym = crate::hashing::Aes90s;
    const NINETIES: bool = true;
    const K: usize = 3;
    const ETA: u32 = 2;
    const DU: u32 = 10;
    const DV: u32 = 4;
    /// Private (secret) key length in bytes.
    pub const SK_LEN: usize = 1152;
    /// Public key length in bytes.
    pub const PK_LEN: usize = 1184;
    /// Ciphertext length in bytes.
    pub const CT_LEN: usize = 1088;

    functionality!();
}


/// # Functionality for the **kyber1024-90s** security parameter set.
///
/// Identical dimensions and sizes to [`kyber1024`], with AES-256-CTR as the XOF and PRF and
/// SHA-256/SHA-512 as the hashes. Keys of the two variants are distinct types.
#[cfg(all(feature = "kyber-1024", feature = "kyber-90s"))]
pub mod kyber1024_90s {
    type Sym = crate::hashing::Aes90s;
    const NINETIES: bool = true;
    const K: usize = 4;
    const ETA: u32 = 2;
    const DU: u32 = 11;
    const DV: u32 = 5;
    /// Private (secret) key length in bytes.
    pub const SK_LEN: usize = 1536;
    /// Public key length in bytes.
    pub const PK_LEN: usize = 1568;
    /// Ciphertext length in bytes.
    pub const CT_LEN: usize = 1568;

    functionality!();
}
