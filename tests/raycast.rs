//! Scenario: a ray fired straight down at a sphere should hit its north pole.

use physics::{Body, Ray, Vec3, World};

#[test]
fn raycast_hits_sphere_at_its_pole() {
    let mut world = World::empty();
    let sphere = world.add(Body::sphere(1.0));

    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
    let hit = world.raycast(ray).expect("ray should hit the sphere");

    assert_eq!(hit.body, sphere);
    assert!((hit.distance - 4.0).abs() < 1e-4, "distance={}", hit.distance);
    assert!((hit.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4, "point={:?}", hit.point);
    assert!((hit.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4, "normal={:?}", hit.normal);
}

#[test]
fn raycast_returns_nearest_of_several_bodies() {
    let mut world = World::empty();
    let _far = world.add(Body::sphere(1.0).move_to(Vec3::new(0.0, 0.0, 10.0)));
    let near = world.add(Body::sphere(1.0).move_to(Vec3::new(0.0, 0.0, 3.0)));

    let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
    let hit = world.raycast(ray).unwrap();
    assert_eq!(hit.body, near);
}

#[test]
fn raycast_misses_empty_world() {
    let world = World::empty();
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);
    assert!(world.raycast(ray).is_none());
}
