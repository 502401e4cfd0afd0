//! Scenario: two boxes close enough that their minimum-overlap separating
//! axis comes from an edge-edge cross product rather than a face normal.

use physics::collision::contacts_for_pair;
use physics::{Body, Vec3, World};

#[test]
fn sat_finds_edge_edge_contact_for_rotated_boxes() {
    let mut world = World::empty();
    let id1 = world.add(Body::block(1.0, 1.0, 1.0));
    let id2 = world.add(
        Body::block(1.0, 1.0, 1.0)
            .move_to(Vec3::new(1.0, 0.0, 1.0))
            .rotate_around(Vec3::Y, std::f32::consts::FRAC_PI_4),
    );

    let body1 = world.body(id1).unwrap();
    let body2 = world.body(id2).unwrap();
    let contacts = contacts_for_pair(id1, body1, id2, body2);

    assert!(!contacts.is_empty(), "expected at least one contact");
    assert!(contacts.len() <= 2, "expected 1-2 contacts, got {}", contacts.len());
    for c in &contacts {
        assert!(c.pi.z < 1.0, "pi.z={}", c.pi.z);
    }
}

#[test]
fn sat_separated_rotated_boxes_produce_no_contact() {
    let mut world = World::empty();
    let id1 = world.add(Body::block(1.0, 1.0, 1.0));
    let id2 = world.add(
        Body::block(1.0, 1.0, 1.0)
            .move_to(Vec3::new(5.0, 0.0, 5.0))
            .rotate_around(Vec3::Y, std::f32::consts::FRAC_PI_4),
    );

    let body1 = world.body(id1).unwrap();
    let body2 = world.body(id2).unwrap();
    assert!(contacts_for_pair(id1, body1, id2, body2).is_empty());
}
