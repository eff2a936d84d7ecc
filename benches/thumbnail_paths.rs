use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use futplus::services::thumbnail::{candidate_paths, normalize_thumbnail_path};

fn benchmark_thumbnail_paths(c: &mut Criterion) {
    let stored = [
        "tecnica/avanzado/regate.jpg",
        "/thumbnails//fisico/intermedio/sprint.png",
        "https://demo.supabase.co/storage/v1/object/public/thumbnails/tactica/principiante/rondo%20basico.jpg?width=320",
        "https://demo.supabase.co/storage/v1/object/sign/thumbnails/a/b/c.jpg?token=eyJhbGciOiJIUzI1NiJ9",
    ];

    let mut group = c.benchmark_group("thumbnail_paths");

    group.bench_function("normalize", |b| {
        b.iter(|| {
            for raw in &stored {
                black_box(normalize_thumbnail_path(black_box(raw), "thumbnails"));
            }
        })
    });

    let normalized: Vec<String> = stored
        .iter()
        .filter_map(|raw| normalize_thumbnail_path(raw, "thumbnails"))
        .collect();

    group.bench_function("candidates", |b| {
        b.iter(|| {
            for path in &normalized {
                black_box(candidate_paths(black_box(path)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_thumbnail_paths);
criterion_main!(benches);
