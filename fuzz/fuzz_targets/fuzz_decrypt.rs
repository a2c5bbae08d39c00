#![no_main]

use libfuzzer_sys::fuzz_target;
use kyber_pke::kyber768;

fuzz_target!(|data: &[u8]| {

    // Arbitrary-length buffers must be rejected or processed, never panic
    if data.len() >= kyber768::SK_LEN {
        let (sk, ct) = data.split_at(kyber768::SK_LEN);
        let _m = kyber768::try_decrypt_slices(sk, ct);
    }
    let _m = kyber768::try_decrypt_slices(data, data);
    let _ct = kyber768::try_encrypt_slices(data, &[0u8; 32], &[0u8; 32]);
});
