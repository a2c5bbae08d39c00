#![no_main]

use libfuzzer_sys::fuzz_target;
use kyber_pke::kyber768;
use kyber_pke::traits::{Decrypter, Encrypter};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fuzz_target!(|data: [u8; 32 + 32]| {  // rng seed + msg

    // The randomized paths driven by a 'fuzzy' seed always round trip a 'fuzzy' message
    let mut rng = ChaCha8Rng::from_seed(data[0..32].try_into().unwrap());
    let msg: [u8; 32] = data[32..].try_into().unwrap();
    let (pk, sk) = kyber768::try_keygen_with_rng(&mut rng).unwrap();
    let ct = pk.try_encrypt_with_rng(&mut rng, &msg).unwrap();
    assert_eq!(sk.decrypt(&ct), msg);
});
