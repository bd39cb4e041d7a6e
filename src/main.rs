use anyhow::Result;
use log::info;

use rusted_locomotion::engine::input::{Action, InputScript};
use rusted_locomotion::engine::physics::{presets, PhysicsWorld};
use rusted_locomotion::game::characters::character::CHARACTER_HEIGHT;
use rusted_locomotion::game::characters::{Character, CharacterState, CharacterStats};

/// Extra ticks simulated after the last scripted input
const SETTLE_TICKS: u64 = 120;

/// Walk right, jump, steer left mid-air, then stop after landing
fn demo_script() -> InputScript {
    InputScript::new()
        .press(30, Action::MoveRight)
        .press(60, Action::Jump)
        .release(70, Action::Jump)
        .release(75, Action::MoveRight)
        .press(80, Action::MoveLeft)
        .release(140, Action::MoveLeft)
        .press(170, Action::Jump)
        .release(175, Action::Jump)
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Rusted Locomotion...");

    let mut physics = PhysicsWorld::new();
    let ground = physics.add_rigid_body(presets::ground_body(0.0, 0.0, 1.0));
    physics.add_collider(presets::ground_collider(200.0, 1.0), ground);

    let mut character = Character::spawn(
        0,
        "player",
        CharacterStats::default(),
        &mut physics,
        0.0,
        CHARACTER_HEIGHT / 2.0,
    )?;

    let mut script = demo_script();
    let last_tick = script.last_tick() + SETTLE_TICKS;
    let dt = physics.timestep();
    let mut last_state = character.state();

    for tick in 0..=last_tick {
        for event in script.events_for_tick(tick) {
            character.handle_input(&mut physics, event);
        }

        character.pre_physics(&mut physics);
        physics.step();
        character.post_physics(&mut physics, dt);

        let state = character.state();
        if state != last_state {
            let (x, y) = character.position(&physics).unwrap_or_default();
            info!(
                "tick {:>4}: {:?} -> {:?} at ({:.2}, {:.2}), facing {}",
                tick,
                last_state,
                state,
                x,
                y,
                character.state_machine().context().facing_sign
            );
            last_state = state;
        }
    }

    if character.state() != CharacterState::Idle {
        anyhow::bail!(
            "Character did not come to rest, ended in {:?}",
            character.state()
        );
    }

    info!(
        "Finished after {} transitions",
        character.state_machine().transition_count()
    );

    Ok(())
}
