//! Scripted walkthrough of the building session.
//!
//! Places two cubes, stacks one on the other, groups them into a "Pillar"
//! structure, stamps the structure elsewhere, exercises undo, and prints the
//! project JSON. Run with `RUST_LOG=debug` to see the session log.

use blockwright::building::{BuilderSession, EditorMode, HitContext, HitTarget, PlacedEntity};
use blockwright::project;
use glam::Vec3;

fn ground_hit(x: f32, z: f32) -> HitContext {
    HitContext {
        point: Vec3::new(x, 0.0, z),
        normal: Vec3::Y,
        target: HitTarget::Ground,
    }
}

fn print_scene(session: &BuilderSession) {
    println!("scene: {} entities", session.entities().len());
    for entity in session.entities() {
        match entity {
            PlacedEntity::Block(block) => println!(
                "  block #{} {} at {:?}",
                block.id.0,
                block.shape.display_name(),
                block.transform.position
            ),
            PlacedEntity::Group(group) => println!(
                "  group #{} '{}' ({} blocks) at {:?}",
                group.id.0,
                group.definition.name,
                group.definition.blocks.len(),
                group.transform.position
            ),
        }
    }
}

fn main() {
    env_logger::init();

    let mut session = BuilderSession::new();

    // A cube on the ground.
    session.pointer_move(Some(&ground_hit(0.0, 0.0)));
    let Some(first) = session.commit() else {
        eprintln!("no resolved placement for the first cube");
        return;
    };
    let PlacedEntity::Block(base) = &session.entities()[0] else {
        eprintln!("expected the first entity to be a block");
        return;
    };

    // A second cube stacked on top of the first.
    let top = HitContext {
        point: Vec3::new(0.0, 1.0, 0.0),
        normal: Vec3::Y,
        target: HitTarget::Block {
            transform: base.transform,
            shape: base.shape,
        },
    };
    session.pointer_move(Some(&top));
    let Some(second) = session.commit() else {
        eprintln!("no resolved placement for the stacked cube");
        return;
    };
    print_scene(&session);

    // Group the two cubes into a reusable pillar.
    session.set_mode(EditorMode::Select);
    session.toggle_select(first);
    session.toggle_select(second);
    match session.create_structure("Pillar") {
        Ok(pillar) => println!("created '{}' with {} blocks", pillar.name, pillar.blocks.len()),
        Err(err) => {
            eprintln!("grouping failed: {err}");
            return;
        }
    }

    // Stamp two pillar instances.
    session.set_mode(EditorMode::Construct);
    for (x, z) in [(3.0, 0.0), (3.0, 3.0)] {
        session.pointer_move(Some(&ground_hit(x, z)));
        session.commit();
    }
    print_scene(&session);

    // Undo the last stamp.
    session.undo();
    println!(
        "after undo: can_undo={} can_redo={}",
        session.can_undo(),
        session.can_redo()
    );
    print_scene(&session);

    match project::encode(&session) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("encode failed: {err}"),
    }
}
