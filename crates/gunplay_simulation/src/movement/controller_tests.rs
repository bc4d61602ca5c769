//! Tests for MovementController.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::movement::{JumpState, MoveIntent, MovementController, Pace};

    const TICK: f32 = 1.0 / 60.0;

    fn controller() -> MovementController {
        MovementController {
            jump_height: 20.0,
            max_jumps: 2,
            gravity: 10.0,
            ..default()
        }
    }

    fn jump() -> MoveIntent {
        MoveIntent {
            jump: true,
            ..default()
        }
    }

    fn idle() -> MoveIntent {
        MoveIntent::default()
    }

    #[test]
    fn test_double_jump_scenario() {
        let mut controller = controller();

        // Grounded + jump (dt = 0 → без вклада gravity)
        controller.tick(&jump(), Quat::IDENTITY, &true, 0.0);
        assert_eq!(controller.vertical_velocity, 20.0);
        assert_eq!(controller.jump_state, JumpState::Airborne { jumps_used: 1 });

        // Airborne(1) + jump → 20 * 1
        controller.tick(&jump(), Quat::IDENTITY, &false, 0.0);
        assert_eq!(controller.vertical_velocity, 20.0);
        assert_eq!(controller.jumps_used(), 2);

        // Airborne(2) + jump → ignored, только gravity
        controller.tick(&jump(), Quat::IDENTITY, &false, 0.5);
        assert!(!controller.jumped);
        assert_eq!(controller.jumps_used(), 2);
        assert!((controller.vertical_velocity - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_air_jumps_escalate() {
        let mut controller = MovementController {
            max_jumps: 3,
            ..controller()
        };

        controller.tick(&jump(), Quat::IDENTITY, &true, 0.0);
        controller.tick(&jump(), Quat::IDENTITY, &false, 0.0);
        assert_eq!(controller.vertical_velocity, 20.0);

        controller.tick(&jump(), Quat::IDENTITY, &false, 0.0);
        assert_eq!(controller.vertical_velocity, 40.0);
        assert_eq!(controller.jumps_used(), 3);
    }

    #[test]
    fn test_jumps_never_exceed_max() {
        for max_jumps in 1..=4 {
            let mut controller = MovementController {
                max_jumps,
                ..controller()
            };
            controller.tick(&jump(), Quat::IDENTITY, &true, TICK);

            for _ in 0..10 {
                let before = controller.vertical_velocity;
                controller.tick(&jump(), Quat::IDENTITY, &false, TICK);
                assert!(controller.jumps_used() <= max_jumps);

                if controller.jumps_used() == max_jumps && !controller.jumped {
                    // Только gravity
                    let expected = (before - controller.gravity * TICK).max(-controller.gravity);
                    assert!((controller.vertical_velocity - expected).abs() < 1e-5);
                }
            }
            assert_eq!(controller.jumps_used(), max_jumps);
        }
    }

    #[test]
    fn test_landing_resets_jumps_same_tick() {
        let mut controller = controller();
        controller.tick(&jump(), Quat::IDENTITY, &true, TICK);
        controller.tick(&jump(), Quat::IDENTITY, &false, TICK);
        assert_eq!(controller.jumps_used(), 2);

        // Падаем
        controller.vertical_velocity = -3.0;
        controller.tick(&idle(), Quat::IDENTITY, &true, TICK);
        assert!(controller.grounded);
        assert_eq!(controller.jump_state, JumpState::Grounded);
        assert_eq!(controller.jumps_used(), 0);
    }

    #[test]
    fn test_rising_actor_is_not_landed() {
        let mut controller = controller();
        controller.tick(&jump(), Quat::IDENTITY, &true, TICK);
        assert!(controller.vertical_velocity > 0.0);

        // Probe ещё задевает пол, но мы летим вверх
        controller.tick(&idle(), Quat::IDENTITY, &true, TICK);
        assert!(!controller.grounded);
        assert_eq!(controller.jumps_used(), 1);
    }

    #[test]
    fn test_walking_off_ledge_allows_full_jump() {
        let mut controller = controller();
        controller.tick(&idle(), Quat::IDENTITY, &true, TICK);
        assert_eq!(controller.jump_state, JumpState::Grounded);

        controller.tick(&idle(), Quat::IDENTITY, &false, TICK);
        assert_eq!(controller.jump_state, JumpState::Airborne { jumps_used: 0 });

        controller.tick(&jump(), Quat::IDENTITY, &false, 0.0);
        assert_eq!(controller.vertical_velocity, 20.0);
        assert_eq!(controller.jumps_used(), 1);
    }

    #[test]
    fn test_gravity_clamped_to_terminal_speed() {
        let mut controller = controller();
        for _ in 0..600 {
            controller.tick(&idle(), Quat::IDENTITY, &false, TICK);
        }
        assert_eq!(controller.vertical_velocity, -controller.gravity);
    }

    #[test]
    fn test_displacement_scaled_by_delta() {
        let mut controller = controller();
        let intent = MoveIntent {
            axes: Vec2::new(0.0, 1.0),
            ..default()
        };

        let displacement = controller.tick(&intent, Quat::IDENTITY, &true, 0.1);

        // forward = -Z, walk 6 m/s
        assert!((displacement.z + 0.6).abs() < 1e-5, "z = {}", displacement.z);
        assert!(displacement.x.abs() < 1e-6);
        // gravity: 0 - 10 * 0.1 = -1 → * 0.1
        assert!((displacement.y + 0.1).abs() < 1e-5, "y = {}", displacement.y);
    }

    #[test]
    fn test_horizontal_uses_actor_basis() {
        let controller = controller();
        let intent = MoveIntent {
            axes: Vec2::new(0.0, 1.0),
            ..default()
        };

        // Поворот на 90° влево: forward (-Z) → -X
        let basis = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let velocity = controller.horizontal_velocity(&intent, basis);
        assert!((velocity.x + 6.0).abs() < 1e-4, "x = {}", velocity.x);
        assert!(velocity.z.abs() < 1e-4);
    }

    #[test]
    fn test_diagonal_input_not_faster() {
        let controller = controller();
        let intent = MoveIntent {
            axes: Vec2::new(1.0, 1.0),
            ..default()
        };
        let velocity = controller.horizontal_velocity(&intent, Quat::IDENTITY);
        assert!((velocity.length() - controller.walk_speed).abs() < 1e-4);
    }

    #[test]
    fn test_pace_selects_speed() {
        let controller = controller();
        let forward = |pace| MoveIntent {
            axes: Vec2::Y,
            jump: false,
            pace,
        };

        let walk = controller.horizontal_velocity(&forward(Pace::Walk), Quat::IDENTITY);
        let run = controller.horizontal_velocity(&forward(Pace::Run), Quat::IDENTITY);
        let crouch = controller.horizontal_velocity(&forward(Pace::Crouch), Quat::IDENTITY);

        assert!((walk.length() - 6.0).abs() < 1e-5);
        assert!((run.length() - 7.5).abs() < 1e-5);
        assert!((crouch.length() - 4.0).abs() < 1e-5);
    }
}
