use physics::{Contact, ContactFilter, ContactPair, Material, RigidBody, Vec2};
use rig::gate::is_open;
use rig::{ScoopGate, PEBBLE, SCOOP};

fn body_moving(vy: f32) -> RigidBody {
    let mut body = RigidBody::dynamic(Vec2::ZERO, 1.0, 1.0);
    body.vel = Vec2::new(3.0, vy);
    body
}

fn contact(normal: Vec2, depth: f32) -> Contact {
    Contact::new(Vec2::ZERO, normal, depth, &Material::default(), &Material::default())
}

#[test]
fn gate_opens_only_when_still_or_rising() {
    for vy in [-500.0, -1.0, -1e-6, 0.0, -0.0] {
        assert!(is_open(vy), "vy {vy}");
    }
    for vy in [1e-6, 1.0, 500.0] {
        assert!(!is_open(vy), "vy {vy}");
    }
}

#[test]
fn scoop_gate_reads_the_scoop_body_regardless_of_order_or_geometry() {
    let pebble = body_moving(-800.0);
    let normals = [Vec2::X, Vec2::Y, Vec2::NEG_Y, Vec2::new(0.6, 0.8)];

    for (vy, expected) in [(-20.0, true), (0.0, true), (20.0, false)] {
        let scoop = body_moving(vy);
        for normal in normals {
            for depth in [0.0, 0.5, 3.0] {
                let forward = ContactPair {
                    tag_a: SCOOP,
                    tag_b: PEBBLE,
                    body_a: &scoop,
                    body_b: &pebble,
                    contact: contact(normal, depth),
                };
                assert_eq!(ScoopGate.should_resolve(&forward), expected);

                let reversed = ContactPair {
                    tag_a: PEBBLE,
                    tag_b: SCOOP,
                    body_a: &pebble,
                    body_b: &scoop,
                    contact: contact(-normal, depth),
                };
                assert_eq!(ScoopGate.should_resolve(&reversed), expected);
            }
        }
    }
}
