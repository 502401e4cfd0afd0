use criterion::{criterion_group, criterion_main, Criterion};
use physics::{Body, Vec3, World};

fn bench_free_sphere_step(c: &mut Criterion) {
    let mut world = World::with_gravity(Vec3::new(0.0, 0.0, -9.81));
    world.add(Body::sphere(1.0).move_to(Vec3::new(0.0, 0.0, 10.0)));
    c.bench_function("single_sphere_step", |b| b.iter(|| world.simulate(1.0 / 60.0)));
}

fn bench_stacked_scene_step(c: &mut Criterion) {
    c.bench_function("stacked_scene_step", |b| {
        b.iter_batched(
            || {
                let mut world = World::with_gravity(Vec3::new(0.0, 0.0, -9.81));
                world.add(Body::plane());
                for i in 0..10 {
                    let z = 0.5 + i as f32;
                    world.add(Body::block(1.0, 1.0, 1.0).move_to(Vec3::new(0.0, 0.0, z)));
                }
                world
            },
            |mut world| world.simulate(1.0 / 60.0),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_free_sphere_step, bench_stacked_scene_step);
criterion_main!(benches);
