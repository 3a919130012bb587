use criterion::{criterion_group, criterion_main, Criterion};
use physics::{moment_for_circle, Collider, Material, PhysicsSim, RigidBody, Vec2};

fn pebble_row(count: usize) -> PhysicsSim {
    let radius = 4.0_f32;
    let mut sim = PhysicsSim::new();
    sim.params.gravity = Vec2::new(0.0, 763.0);
    let floor = sim.add_body(RigidBody::fixed(Vec2::ZERO));
    sim.add_collider(floor, Collider::segment(Vec2::new(0.0, 615.0), Vec2::new(2000.0, 615.0), 5.0))
        .unwrap();
    for i in 0..count {
        let x = i as f32 * radius * 2.0 + radius;
        let body = sim.add_body(RigidBody::dynamic(
            Vec2::new(x, 615.0 - 5.0 - radius - 5.0),
            0.1,
            moment_for_circle(0.1, 0.0, radius, Vec2::ZERO),
        ));
        sim.add_collider(
            body,
            Collider::circle(Vec2::ZERO, radius).with_material(Material::new(5.0, 0.8)),
        )
        .unwrap();
    }
    sim
}

fn bench_pebble_row(c: &mut Criterion) {
    let mut sim = pebble_row(250);
    c.bench_function("pebble_row_step", |b| b.iter(|| sim.step(1.0 / 60.0)));
}

criterion_group!(benches, bench_pebble_row);
criterion_main!(benches);
