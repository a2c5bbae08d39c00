#![no_main]

use libfuzzer_sys::fuzz_target;
use kyber_pke::kyber512;
use kyber_pke::traits::{Decrypter, Encrypter, KeyGen, SerDes};

fuzz_target!(|data: [u8; 768+736+800+32]| {  // sk_len + ct_len + pk_len + msg = 2336

    // Deserialize a 'fuzzy' secret key
    let sk = kyber512::PrivateKey::try_from_bytes(data[0..768].try_into().unwrap());

    // Try to use 'fuzzy' sk on a 'fuzzy' ciphertext (a decent (?) proportion will deserialize OK)
    let ct: [u8; kyber512::CT_LEN] = data[768..768+736].try_into().unwrap();
    if let Ok(sk) = sk {
        let _m = sk.decrypt(&ct);
    }

    // A good key on the 'fuzzy' ciphertext always decodes to some message
    let (pk, sk) = kyber512::KG::keygen_from_seed(&[0u8; 32]).unwrap();
    let _m = sk.decrypt(&ct);


    // Deserialize a 'fuzzy' public key
    let pk_fuzz = kyber512::PublicKey::try_from_bytes(data[768+736..768+736+800].try_into().unwrap());
    let msg: [u8; 32] = data[768+736+800..].try_into().unwrap();

    // Try to use 'fuzzy' pk (a decent (?) proportion will deserialize OK)
    if let Ok(pk_fuzz) = pk_fuzz {
        let _ct = pk_fuzz.try_encrypt_with_coins(&msg, &[1u8; 32]);
    }

    // A good key always round trips a 'fuzzy' message
    let ct2 = pk.try_encrypt_with_coins(&msg, &data[0..32].try_into().unwrap()).unwrap();
    assert_eq!(sk.decrypt(&ct2), msg);
});
