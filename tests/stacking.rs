//! Scenario: two unit boxes stacked on a static plane should settle near
//! their resting heights and stay stacked, not interpenetrate or topple.

use physics::{Body, Vec3, World};

#[test]
fn two_boxes_settle_stacked_on_a_plane() {
    let mut world = World::with_gravity(Vec3::new(0.0, 0.0, -10.0));
    world.add(Body::plane());
    let bottom = world.add(Body::block(1.0, 1.0, 1.0).move_to(Vec3::new(0.0, 0.0, 0.5)));
    let top = world.add(Body::block(1.0, 1.0, 1.0).move_to(Vec3::new(0.0, 0.0, 1.5)));

    for _ in 0..(60 * 2) {
        world.simulate(1.0 / 60.0);
    }

    let bottom_z = world.body(bottom).unwrap().frame().position.z;
    let top_z = world.body(top).unwrap().frame().position.z;
    assert!((0.49..=0.51).contains(&bottom_z), "bottom_z={bottom_z}");
    assert!((1.49..=1.51).contains(&top_z), "top_z={top_z}");
}
