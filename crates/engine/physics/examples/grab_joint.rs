use handhold_physics::{glam::Vec3, BodyDesc, GrabBody, GrabJoint, JointAnchor, PhysicsWorld};

fn main() {
    println!("=== Grab Joint Simulation ===\n");

    let mut world = PhysicsWorld::new(Vec3::new(0.0, -10.0, 0.0));
    GrabBody::spawn_ground(&mut world, 0.0);
    let anchor = JointAnchor::new(&mut world, Vec3::ZERO);
    let body = GrabBody::spawn(&mut world, &BodyDesc::cube_at(Vec3::new(0.0, 1.0, -3.0)));
    println!("Created box at (0, 1, -3) with mass 5\n");

    let grab_point = Vec3::new(0.0, 1.5, -3.0);
    let joint = match GrabJoint::attach(&mut world, body.body_handle(), &anchor, grab_point) {
        Ok(joint) => joint,
        Err(e) => {
            eprintln!("Failed to attach joint: {}", e);
            return;
        }
    };
    println!("Grabbed top face at {:?}\n", grab_point);

    let dt = 1.0 / 60.0;
    for i in 0..180 {
        // Lift the anchor by a metre over the first second
        let t = (i as f32 / 60.0).min(1.0);
        let target = grab_point + Vec3::new(0.0, t, 0.0);
        if let Err(e) = joint.refresh(&mut world, target) {
            eprintln!("Joint refresh failed: {}", e);
            break;
        }
        world.step(dt);

        if i % 30 == 0 {
            let pos = body.position(&world);
            println!(
                "Time: {:.2}s | Anchor: {:.3} | Box: ({:.3}, {:.3}, {:.3})",
                i as f32 * dt,
                target.y,
                pos.x,
                pos.y,
                pos.z
            );
        }
    }

    joint.detach(&mut world);
    for _ in 0..120 {
        world.step(dt);
    }

    let final_pos = body.position(&world);
    println!("\nReleased, final position: ({:.3}, {:.3}, {:.3})", final_pos.x, final_pos.y, final_pos.z);
}
