use criterion::{criterion_group, criterion_main, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use gfaes_core::{encrypt_block, expand_key};
use gfaes_modes::{Cipher, CipherOptions, Mode, Strength};

fn bench_engine(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);

    let mut group = c.benchmark_group("engine");
    group.bench_function("expand_key", |b| {
        b.iter(|| expand_key(&key, 10).unwrap());
    });

    let round_keys = expand_key(&key, 10).unwrap();
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut block);
    group.bench_function("encrypt_block", |b| {
        b.iter(|| encrypt_block(&block, &round_keys).unwrap());
    });
    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut key = [0u8; 16];
    let mut iv = [0u8; 16];
    let mut message = vec![0u8; 4096];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    rng.fill_bytes(&mut message);

    let mut group = c.benchmark_group("modes");
    group.sample_size(20);
    for mode in [Mode::Cbc, Mode::Ctr] {
        let cipher = Cipher::new(&key, CipherOptions::new(Strength::Aes128, mode)).unwrap();
        let sealed = cipher.encrypt(&message, &iv).unwrap();
        group.bench_function(format!("{mode}_encrypt_4k"), |b| {
            b.iter(|| cipher.encrypt(&message, &iv).unwrap());
        });
        group.bench_function(format!("{mode}_decrypt_4k"), |b| {
            b.iter(|| cipher.decrypt(&sealed).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine, bench_modes);
criterion_main!(benches);
