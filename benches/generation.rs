use criterion::{criterion_group, criterion_main, Criterion, black_box};

use gloam::carving::{CarvingConfig, FeatureCarver};
use gloam::noise_field::NoiseField;
use gloam::population::ObjectPopulator;
use gloam::scene::{SceneConfig, SceneManager};
use gloam::terrain::{BiomeParams, TerrainSynthesizer};

fn bench_fbm(c: &mut Criterion) {
    let field = NoiseField::new(42);

    c.bench_function("fbm_2d_4_octaves", |b| {
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.013;
            field.fbm_2d(black_box(x), black_box(x * 0.7), 4, 2.0, 0.5)
        });
    });
}

fn bench_synthesize_64(c: &mut Criterion) {
    let biome = BiomeParams::dark_forest();

    c.bench_function("synthesize_64", |b| {
        b.iter(|| TerrainSynthesizer::new(black_box(42), &biome, 1.0, 20.0).synthesize(64, 64));
    });
}

fn bench_synthesize_256(c: &mut Criterion) {
    let biome = BiomeParams::mountains();

    c.bench_function("synthesize_256", |b| {
        b.iter(|| TerrainSynthesizer::new(black_box(42), &biome, 1.0, 20.0).synthesize(256, 256));
    });
}

fn bench_carve_and_populate(c: &mut Criterion) {
    let biome = BiomeParams::dark_forest();
    let map = TerrainSynthesizer::new(42, &biome, 1.0, 20.0).synthesize(128, 128);

    c.bench_function("carve_128", |b| {
        b.iter(|| {
            let mut map = map.clone();
            FeatureCarver::new(black_box(42), CarvingConfig::default()).carve(&mut map, biome.terrain_style)
        });
    });

    c.bench_function("populate_128", |b| {
        b.iter(|| ObjectPopulator::new(black_box(42), &biome, 0).populate(&map));
    });
}

fn bench_world(c: &mut Criterion) {
    let manager = SceneManager::new(SceneConfig { seed: 42, ..Default::default() }).unwrap();

    c.bench_function("generate_initial_world_64", |b| {
        b.iter(|| manager.generate_initial_world());
    });

    manager.generate_initial_world();
    c.bench_function("evolution_tick", |b| {
        // One tick per update at the default 2s interval
        b.iter(|| manager.update(black_box(2.0)));
    });

    c.bench_function("terrain_height_query", |b| {
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            manager.terrain_height_at(black_box((i % 63) as f32 + 0.5), black_box(((i / 63) % 63) as f32))
        });
    });
}

criterion_group!(
    benches,
    bench_fbm,
    bench_synthesize_64,
    bench_synthesize_256,
    bench_carve_and_populate,
    bench_world,
);
criterion_main!(benches);
