use criterion::{criterion_group, BatchSize, Criterion};
use rand::{thread_rng, Rng};
use secp256k1_compact::{secp256k1::PrivateKey, Sha256};
use std::hint::black_box;

fn benchmark_signature_generation(c: &mut Criterion) {
    let namespace = b"namespace";
    let mut msg = [0u8; 32];
    thread_rng().fill(&mut msg);
    c.bench_function(
        &format!(
            "{}/ns_len={} msg_len={}",
            module_path!(),
            namespace.len(),
            msg.len()
        ),
        |b| {
            b.iter_batched(
                || PrivateKey::from_rng(&mut thread_rng()),
                |signer| {
                    black_box(signer.sign::<Sha256>(Some(namespace), &msg).unwrap());
                },
                BatchSize::SmallInput,
            );
        },
    );
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_signature_generation
}
