use rand_core::CryptoRngCore;
#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// The `KeyGen` trait is defined to allow trait objects.
pub trait KeyGen {
    /// A public key specific to the chosen security parameter set, e.g., kyber512, kyber768 or kyber1024
    type PublicKey;
    /// A private (secret) key specific to the chosen security parameter set, e.g., kyber512, kyber768 or kyber1024
    type PrivateKey;

    /// Generates a public and private key pair specific to this security parameter set. <br>
    /// This function utilizes the OS default random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "kyber-512", feature = "default-rng"))] {
    /// use kyber_pke::kyber512; // Could also be kyber768 or kyber1024.
    /// use kyber_pke::traits::{Decrypter, Encrypter, KeyGen};
    ///
    /// let message = [7u8; 32];
    ///
    /// let (pk, sk) = kyber512::KG::try_keygen()?; // Generate both public and secret keys
    /// let ct = pk.try_encrypt(&message)?; // Use the public key to encrypt the message
    /// assert_eq!(sk.decrypt(&ct), message); // Use the secret key to recover it
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::PublicKey, Self::PrivateKey), &'static str> {
        Self::try_keygen_with_rng(&mut OsRng)
    }

    /// Generates a public and private key pair specific to this security parameter set. <br>
    /// This function utilizes a supplied random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(feature = "kyber-768")] {
    /// use kyber_pke::kyber768; // Could also be kyber512 or kyber1024.
    /// use kyber_pke::traits::{Decrypter, Encrypter, KeyGen};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let message = [7u8; 32];
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    ///
    /// let (pk, sk) = kyber768::KG::try_keygen_with_rng(&mut rng)?; // Generate both public and secret keys
    /// let ct = pk.try_encrypt_with_rng(&mut rng, &message)?; // Use the public key to encrypt the message
    /// assert_eq!(sk.decrypt(&ct), message); // Use the secret key to recover it
    /// # }
    /// # Ok(())}
    /// ```
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), &'static str>;

    /// Deterministically generates a public and private key pair from a 32-byte seed. The same
    /// seed always gives the same key pair; the seed must be secret and uniformly random.
    /// # Errors
    /// Propagates internal errors (the matrix generator rejection-sampling bound).
    fn keygen_from_seed(d: &[u8; 32]) -> Result<(Self::PublicKey, Self::PrivateKey), &'static str>;
}


/// The `Encrypter` trait is implemented for the `PublicKey` struct on each of the security parameter sets
pub trait Encrypter {
    /// The ciphertext is specific to the chosen security parameter set, e.g., kyber512, kyber768 or kyber1024
    type Ciphertext;

    /// Encrypts a 32-byte message under the public key with coins derived from the default OS RNG
    /// and the public key itself.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    #[cfg(feature = "default-rng")]
    fn try_encrypt(&self, msg: &[u8; 32]) -> Result<Self::Ciphertext, &'static str> {
        self.try_encrypt_with_rng(&mut OsRng, msg)
    }

    /// Encrypts a 32-byte message under the public key. The 32 bytes drawn from `rng` are hashed
    /// together with the public key to derive the encryption coins.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    fn try_encrypt_with_rng(
        &self, rng: &mut impl CryptoRngCore, msg: &[u8; 32],
    ) -> Result<Self::Ciphertext, &'static str>;

    /// Deterministically encrypts a 32-byte message under the public key with the supplied
    /// 32-byte coins. Reusing coins across messages leaks their relationship; the coins must be
    /// fresh, secret and uniformly random.
    ///
    /// # Errors
    /// Propagates internal errors (the matrix generator rejection-sampling bound).
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(feature = "kyber-1024")] {
    /// use kyber_pke::kyber1024; // Could also be kyber512 or kyber768.
    /// use kyber_pke::traits::{Decrypter, Encrypter, KeyGen, SerDes};
    ///
    /// let (pk, sk) = kyber1024::KG::keygen_from_seed(&[1u8; 32])?;
    /// let ct1 = pk.try_encrypt_with_coins(&[2u8; 32], &[3u8; 32])?;
    /// let pk2 = kyber1024::PublicKey::try_from_bytes(pk.into_bytes())?;
    /// let ct2 = pk2.try_encrypt_with_coins(&[2u8; 32], &[3u8; 32])?;
    /// assert_eq!(ct1, ct2);
    /// assert_eq!(sk.decrypt(&ct1), [2u8; 32]);
    /// # }
    /// # Ok(())}
    /// ```
    fn try_encrypt_with_coins(&self, msg: &[u8; 32], coins: &[u8; 32]) -> Result<Self::Ciphertext, &'static str>;
}


/// The `Decrypter` trait is implemented for the `PrivateKey` struct on each of the security parameter sets
pub trait Decrypter {
    /// The ciphertext is specific to the chosen security parameter set, e.g., kyber512, kyber768 or kyber1024
    type Ciphertext;

    /// Recovers the 32-byte message from a ciphertext. Any ciphertext of the correct size decodes to
    /// some message, so this function does not fail; a mismatched key or a corrupted ciphertext
    /// yields an unrelated message. Operates in constant time with respect to the private key.
    fn decrypt(&self, ct: &Self::Ciphertext) -> [u8; 32];
}


/// The `SerDes` trait provides for validated serialization and deserialization of fixed- and correctly-size elements.
/// Deserialization rejects keys holding any 12-bit coefficient outside of `[0, q)`, which no honest key
/// generation produces.
pub trait SerDes {
    /// The fixed-size byte array to be serialized or deserialized
    type ByteArray;

    /// Produces a byte array of fixed-size specific to the struct being serialized.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "kyber-768", feature = "default-rng"))] {
    /// use kyber_pke::kyber768; // Could also be kyber512 or kyber1024.
    /// use kyber_pke::traits::{KeyGen, SerDes};
    ///
    /// let (pk, sk) = kyber768::KG::try_keygen()?; // Generate both public and secret keys
    /// let pk_bytes = pk.into_bytes(); // Serialize the public key
    /// let sk_bytes = sk.into_bytes(); // Serialize the private key
    /// assert_eq!(pk_bytes.len(), kyber768::PK_LEN);
    /// assert_eq!(sk_bytes.len(), kyber768::SK_LEN);
    /// # }
    /// # Ok(())}
    /// ```
    fn into_bytes(self) -> Self::ByteArray;

    /// Consumes a byte array of fixed-size specific to the struct being deserialized; performs validation
    /// # Errors
    /// Returns an error on malformed input.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "kyber-1024", feature = "default-rng"))] {
    /// use kyber_pke::kyber1024; // Could also be kyber512 or kyber768.
    /// use kyber_pke::traits::{KeyGen, SerDes};
    ///
    /// let (pk, sk) = kyber1024::try_keygen()?; // Generate both public and secret keys
    /// let pk_bytes = pk.into_bytes(); // Serialize the public key
    /// let sk_bytes = sk.into_bytes(); // Serialize the private key
    /// let pk2 = kyber1024::PublicKey::try_from_bytes(pk_bytes)?;
    /// let sk2 = kyber1024::PrivateKey::try_from_bytes(sk_bytes)?;
    /// assert!(kyber1024::PrivateKey::try_from_bytes([0xFFu8; kyber1024::SK_LEN]).is_err());
    /// # }
    /// # Ok(())}
    /// ```
    fn try_from_bytes(ba: Self::ByteArray) -> Result<Self, &'static str>
    where
        Self: Sized;
}
