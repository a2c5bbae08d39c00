use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use kyber_pke::kyber512; // Could also be kyber768 or kyber1024.
use kyber_pke::traits::{Decrypter, Encrypter, KeyGen};
use rand_core::{CryptoRng, RngCore};

// Test RNG to regurgitate incremented values when 'asked'
#[derive(Clone)]
#[repr(align(8))]
struct TestRng { value: u32 }

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, _out: &mut [u8]) { unimplemented!() }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        out.iter_mut().for_each(|b| *b = self.value.to_le_bytes()[0]);
        out[0..4].copy_from_slice(&self.value.to_be_bytes());
        self.value = self.value.wrapping_add(1);
        Ok(())
    }
}

impl CryptoRng for TestRng {}



fn decrypt(runner: &mut CtRunner, mut _rng: &mut BenchRng) {
    const ITERATIONS_INNER: usize = 5;
    const ITERATIONS_OUTER: usize = 200_000;

    // Two private key classes; the ciphertext is shared
    let (pk, sk_left) = kyber512::KG::try_keygen_with_rng(&mut TestRng { value: 12 }).unwrap();
    let (_, sk_right) = kyber512::KG::try_keygen_with_rng(&mut TestRng { value: 56 }).unwrap(); // <--- different seed value
    let ct = pk.try_encrypt_with_rng(&mut TestRng { value: 34 }, &[0x5Au8; 32]).unwrap();

    let mut classes = [Class::Right; ITERATIONS_OUTER];

    // Interleave left and right
    for i in (0..ITERATIONS_OUTER).step_by(2) {
        classes[i] = Class::Left;
    }

    for class in classes {
        let sk = if matches!(class, Class::Left) { &sk_left } else { &sk_right };
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                let _ = sk.decrypt(&ct);
            }
        })
    }
}

ctbench_main!(decrypt);
