use criterion::{criterion_group, criterion_main, Criterion};
use kyber_pke::traits::{Decrypter, Encrypter};
use kyber_pke::{kyber1024, kyber512, kyber512_90s, kyber768};


pub fn criterion_benchmark(c: &mut Criterion) {
    let message = [0x5Au8; 32];
    let coins = [0xA5u8; 32];

    let (pk512, sk512) = kyber512::try_keygen().unwrap();
    let ct512 = pk512.try_encrypt(&message).unwrap();

    let (pk768, sk768) = kyber768::try_keygen().unwrap();
    let ct768 = pk768.try_encrypt(&message).unwrap();

    let (pk1024, sk1024) = kyber1024::try_keygen().unwrap();
    let ct1024 = pk1024.try_encrypt(&message).unwrap();

    let (pk512_90s, sk512_90s) = kyber512_90s::try_keygen().unwrap();
    let ct512_90s = pk512_90s.try_encrypt(&message).unwrap();


    c.bench_function("kyber512 keygen", |b| b.iter(|| kyber512::try_keygen()));
    c.bench_function("kyber512 encrypt", |b| b.iter(|| pk512.try_encrypt_with_coins(&message, &coins)));
    c.bench_function("kyber512 decrypt", |b| b.iter(|| sk512.decrypt(&ct512)));

    c.bench_function("kyber768 keygen", |b| b.iter(|| kyber768::try_keygen()));
    c.bench_function("kyber768 encrypt", |b| b.iter(|| pk768.try_encrypt_with_coins(&message, &coins)));
    c.bench_function("kyber768 decrypt", |b| b.iter(|| sk768.decrypt(&ct768)));

    c.bench_function("kyber1024 keygen", |b| b.iter(|| kyber1024::try_keygen()));
    c.bench_function("kyber1024 encrypt", |b| b.iter(|| pk1024.try_encrypt_with_coins(&message, &coins)));
    c.bench_function("kyber1024 decrypt", |b| b.iter(|| sk1024.decrypt(&ct1024)));

    c.bench_function("kyber512-90s keygen", |b| b.iter(|| kyber512_90s::try_keygen()));
    c.bench_function("kyber512-90s encrypt", |b| b.iter(|| pk512_90s.try_encrypt_with_coins(&message, &coins)));
    c.bench_function("kyber512-90s decrypt", |b| b.iter(|| sk512_90s.decrypt(&ct512_90s)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

// cargo bench
