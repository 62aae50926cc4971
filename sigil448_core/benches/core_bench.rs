use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand_core::RngCore;
use sigil448_core::{
    decrypt_symmetric, derive_rng, encrypt_symmetric_with_rng, generate_key_pair, keccak,
    kmac_xof_256, sign, verify, CurvePoint, Scalar,
};

fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("keccak");
    let mut state = [0u8; keccak::STATE_BYTES];
    group.bench_function("permute", |b| {
        b.iter(|| {
            keccak::permute(&mut state);
            black_box(state[0])
        })
    });
}

fn bench_kmac(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmac");
    let data = vec![0x5Au8; 1024];
    group.bench_function("xof_1kib_to_64", |b| {
        b.iter(|| {
            let out = kmac_xof_256(b"bench-key", &data, 512, b"S").unwrap();
            black_box(out)
        })
    });
}

fn bench_scalar_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve");
    group.sample_size(10);
    let mut rng = derive_rng(b"bench-scalar");
    let mut buf = [0u8; 64];
    rng.fill_bytes(&mut buf);
    let k = Scalar::reduce_bytes(&buf);
    group.bench_function("scalar_multiply_base", |b| {
        b.iter(|| black_box(CurvePoint::base().scalar_multiply(&k)))
    });
}

fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("schnorr");
    group.sample_size(10);
    let pair = generate_key_pair(b"bench-passphrase");
    let message = vec![0xA5u8; 256];
    group.bench_function("sign", |b| b.iter(|| black_box(sign(&message, b"bench-passphrase"))));
    let signature = sign(&message, b"bench-passphrase");
    group.bench_function("verify", |b| {
        b.iter(|| black_box(verify(&signature, &message, &pair.public_key)))
    });
}

fn bench_symmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("symmetric");
    let message = vec![0x3Cu8; 1024];
    group.bench_function("encrypt_decrypt_1kib", |b| {
        b.iter(|| {
            let mut rng = derive_rng(b"bench-symmetric");
            let cryptogram = encrypt_symmetric_with_rng(&message, b"pw", &mut rng);
            black_box(decrypt_symmetric(&cryptogram, b"pw").unwrap())
        })
    });
}

criterion_group!(
    benches,
    bench_permutation,
    bench_kmac,
    bench_scalar_multiply,
    bench_signatures,
    bench_symmetric
);
criterion_main!(benches);
