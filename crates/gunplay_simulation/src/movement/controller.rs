//! MovementController: kinematic motion + ground detection + multi-jump
//!
//! Без ускорения: скорость по горизонтали мгновенная (arcade feel).
//!
//! Jump FSM:
//! - `Grounded` + jump → vertical = jump_height, `Airborne(1)`
//! - `Airborne(n)` + jump, n < max_jumps → vertical = jump_height * max(n, 1), n + 1
//! - `Airborne(n)` + jump, n ≥ max_jumps → ignored
//! - probe reports ground (и актор не поднимается) → `Grounded`, jumps_used = 0
//!
//! Прыжки усиливаются: второй прыжок = jump_height * 1, третий = jump_height * 2.
//! Это поведение прототипа, не баг.

use bevy::prelude::*;

use crate::config::ActorTuning;
use crate::physics::GroundProbe;

/// Темп ходьбы (выбирает скорость из tunables)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum Pace {
    #[default]
    Walk,
    Run,
    Crouch,
}

/// Состояние прыжка
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum JumpState {
    #[default]
    Grounded,
    /// В воздухе; `jumps_used` = 0 если сошли с края без прыжка
    Airborne { jumps_used: u32 },
}

/// Movement intent на один тик (из InputSnapshot)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// x = strafe, y = forward; clamp в единичный круг
    pub axes: Vec2,
    pub jump: bool,
    pub pace: Pace,
}

/// Kinematic контроллер актора
///
/// Инвариант: 0 ≤ jumps_used ≤ max_jumps.
/// `grounded`: результат probe текущего тика, между тиками не используется.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct MovementController {
    // === Tunables ===
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    /// Ускорение падения; также terminal fall speed
    pub gravity: f32,
    /// Начальная вертикальная скорость прыжка
    pub jump_height: f32,
    pub max_jumps: u32,
    pub ground_ray_distance: f32,

    // === Runtime state ===
    pub vertical_velocity: f32,
    pub jump_state: JumpState,
    pub grounded: bool,
    /// Прыжок состоялся в последнем тике
    pub jumped: bool,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::from_tuning(&ActorTuning::default())
    }
}

impl MovementController {
    pub fn from_tuning(tuning: &ActorTuning) -> Self {
        Self {
            walk_speed: tuning.walk_speed,
            run_speed: tuning.run_speed,
            crouch_speed: tuning.crouch_speed,
            gravity: tuning.gravity,
            jump_height: tuning.jump_height,
            max_jumps: tuning.max_jumps,
            ground_ray_distance: tuning.ground_ray_distance,
            vertical_velocity: 0.0,
            jump_state: JumpState::Grounded,
            grounded: false,
            jumped: false,
        }
    }

    pub fn jumps_used(&self) -> u32 {
        match self.jump_state {
            JumpState::Grounded => 0,
            JumpState::Airborne { jumps_used } => jumps_used,
        }
    }

    pub fn speed_for(&self, pace: Pace) -> f32 {
        match pace {
            Pace::Walk => self.walk_speed,
            Pace::Run => self.run_speed,
            Pace::Crouch => self.crouch_speed,
        }
    }

    /// Один тик движения → displacement для motion collaborator
    ///
    /// Порядок: ground probe → jump → gravity (+clamp) → displacement.
    /// `basis`: yaw актора (local forward = -Z, right = +X).
    pub fn tick(
        &mut self,
        intent: &MoveIntent,
        basis: Quat,
        ground: &dyn GroundProbe,
        delta: f32,
    ) -> Vec3 {
        let horizontal = self.horizontal_velocity(intent, basis);

        self.update_ground_state(ground.is_grounded(self.ground_ray_distance));

        self.jumped = intent.jump && self.try_jump().is_some();

        self.vertical_velocity -= self.gravity * delta;
        self.vertical_velocity = self.vertical_velocity.max(-self.gravity);

        Vec3::new(horizontal.x, self.vertical_velocity, horizontal.z) * delta
    }

    /// Горизонтальная скорость (м/с) в world space
    pub fn horizontal_velocity(&self, intent: &MoveIntent, basis: Quat) -> Vec3 {
        let axes = if intent.axes.is_finite() {
            intent.axes.clamp_length_max(1.0)
        } else {
            Vec2::ZERO
        };
        let local = Vec3::new(axes.x, 0.0, -axes.y);
        let mut world = basis * local;
        world.y = 0.0;
        world * self.speed_for(intent.pace)
    }

    /// Ground state на этот тик
    ///
    /// Поднимающийся актор (vertical_velocity > 0) не считается приземлившимся,
    /// даже если probe ещё задевает пол сразу после прыжка.
    pub fn update_ground_state(&mut self, probe_hit: bool) {
        self.grounded = probe_hit && self.vertical_velocity <= 0.0;

        if self.grounded {
            self.jump_state = JumpState::Grounded;
        } else if self.jump_state == JumpState::Grounded {
            // Сошли с края без прыжка
            self.jump_state = JumpState::Airborne { jumps_used: 0 };
        }
    }

    /// Попытка прыжка; `Some(vertical_velocity)` если прыжок состоялся
    pub fn try_jump(&mut self) -> Option<f32> {
        match self.jump_state {
            JumpState::Grounded if self.max_jumps > 0 => {
                self.vertical_velocity = self.jump_height;
                self.jump_state = JumpState::Airborne { jumps_used: 1 };
                Some(self.vertical_velocity)
            }
            JumpState::Airborne { jumps_used } if jumps_used < self.max_jumps => {
                self.vertical_velocity = self.jump_height * jumps_used.max(1) as f32;
                self.jump_state = JumpState::Airborne {
                    jumps_used: jumps_used + 1,
                };
                Some(self.vertical_velocity)
            }
            _ => None,
        }
    }
}
