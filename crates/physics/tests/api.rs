use physics::{Collider, PhysicsError, PhysicsSim, RigidBody, Vec2};

#[test]
fn removing_body_detaches_colliders_and_joints() {
    let mut sim = PhysicsSim::new();
    let body = sim.add_body(RigidBody::dynamic(Vec2::ZERO, 1.0, 1.0));
    let other = sim.add_body(RigidBody::dynamic(Vec2::new(50.0, 0.0), 1.0, 1.0));
    let collider = sim.add_collider(body, Collider::circle(Vec2::ZERO, 1.0)).unwrap();
    sim.add_collider(other, Collider::circle(Vec2::ZERO, 1.0)).unwrap();
    let joint = sim.add_distance_joint(body, Vec2::ZERO, Vec2::new(0.0, -10.0), 10.0).unwrap();

    sim.remove_body(body).unwrap();

    let stats = sim.stats();
    assert_eq!(stats.bodies, 1);
    assert_eq!(stats.colliders, 1);
    assert_eq!(stats.joints, 0);
    assert!(sim.collider(collider).is_none());
    assert!(sim.joint(joint).is_none());
}

#[test]
fn stale_handles_are_rejected() {
    let mut sim = PhysicsSim::new();
    let body = sim.add_body(RigidBody::dynamic(Vec2::ZERO, 1.0, 1.0));
    sim.remove_body(body).unwrap();

    assert_eq!(sim.remove_body(body), Err(PhysicsError::StaleBody(body)));
    assert_eq!(
        sim.add_collider(body, Collider::circle(Vec2::ZERO, 1.0)),
        Err(PhysicsError::StaleBody(body))
    );
    assert!(sim.local_to_world(body, Vec2::ZERO).is_err());

    // A new body may reuse the slot but never the handle
    let replacement = sim.add_body(RigidBody::dynamic(Vec2::ZERO, 1.0, 1.0));
    assert_ne!(body, replacement);
    assert!(sim.body(body).is_none());
}

#[test]
fn local_to_world_applies_rotation_and_translation() {
    let mut sim = PhysicsSim::new();
    let mut rod = RigidBody::dynamic(Vec2::new(10.0, 20.0), 1.0, 1.0);
    rod.angle = std::f32::consts::FRAC_PI_2;
    let rod = sim.add_body(rod);

    let world = sim.local_to_world(rod, Vec2::new(5.0, 0.0)).unwrap();
    assert!((world - Vec2::new(10.0, 25.0)).length() < 1e-4);
}
