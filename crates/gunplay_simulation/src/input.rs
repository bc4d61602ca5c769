//! Per-tick input snapshot (logical actions, не физические устройства)
//!
//! Маппинг клавиатура/мышь/геймпад → `InputSnapshot` живёт снаружи.
//! Для headless тестов и demo: snapshot пишется напрямую в `ActorInput`.

use bevy::prelude::*;

/// Логические действия за один тик
///
/// Edge-поля (`*_pressed`, `scroll_delta`, `select_slot`) действуют ровно один
/// fixed tick: `consume_input_edges` сбрасывает их в конце тика, даже если кадр
/// прогоняет FixedUpdate несколько раз. Level-поля (`*_held`, `move_axes`)
/// держатся, пока хост их не перепишет.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct InputSnapshot {
    /// x = strafe (right +), y = forward (+); каждая ось в [-1, 1]
    pub move_axes: Vec2,
    pub jump_pressed: bool,
    pub sprint_held: bool,
    pub crouch_held: bool,
    pub fire_held: bool,
    pub interact_pressed: bool,
    pub reload_pressed: bool,
    pub drop_pressed: bool,
    /// Raw scroll delta за тик (знак = направление)
    pub scroll_delta: f32,
    /// Прямой выбор слота (hotkeys 1..n → 0..n-1)
    pub select_slot: Option<usize>,
}

impl InputSnapshot {
    /// Scroll → направление cycle
    ///
    /// ceil для положительных, floor для отрицательных (0.1 → +1, -0.1 → -1),
    /// затем clamp в [-1, 1]. 0 = нет переключения.
    pub fn cycle_direction(&self) -> i32 {
        let delta = self.scroll_delta;
        if !delta.is_finite() || delta == 0.0 {
            return 0;
        }
        let rounded = if delta > 0.0 { delta.ceil() } else { delta.floor() };
        (rounded as i32).clamp(-1, 1)
    }

    /// Сбросить edge-поля, level-поля остаются
    pub fn consume_edges(&mut self) {
        self.jump_pressed = false;
        self.interact_pressed = false;
        self.reload_pressed = false;
        self.drop_pressed = false;
        self.scroll_delta = 0.0;
        self.select_slot = None;
    }

    /// Pace для MovementController (crouch важнее sprint)
    pub fn pace(&self) -> crate::movement::Pace {
        use crate::movement::Pace;
        if self.crouch_held {
            Pace::Crouch
        } else if self.sprint_held {
            Pace::Run
        } else {
            Pace::Walk
        }
    }
}

/// Input snapshot текущего тика для конкретного актора
///
/// Игрок: заполняется input mapping'ом хоста.
/// Акторы без источника input'а остаются с `InputSnapshot::default()` (стоят на месте).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ActorInput(pub InputSnapshot);

/// System: конец fixed tick → edge-поля потреблены
///
/// Одно нажатие = одно действие при любом числе FixedUpdate за кадр.
pub fn consume_input_edges(mut inputs: Query<&mut ActorInput>) {
    for mut input in inputs.iter_mut() {
        let mut snapshot = input.0;
        snapshot.consume_edges();
        // Change detection только при реальном сбросе
        input.set_if_neq(ActorInput(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::Pace;

    fn scroll(delta: f32) -> InputSnapshot {
        InputSnapshot {
            scroll_delta: delta,
            ..default()
        }
    }

    #[test]
    fn test_cycle_direction_rounding() {
        assert_eq!(scroll(0.0).cycle_direction(), 0);
        assert_eq!(scroll(0.1).cycle_direction(), 1);
        assert_eq!(scroll(1.0).cycle_direction(), 1);
        assert_eq!(scroll(3.5).cycle_direction(), 1);
        assert_eq!(scroll(-0.1).cycle_direction(), -1);
        assert_eq!(scroll(-2.0).cycle_direction(), -1);
        assert_eq!(scroll(f32::NAN).cycle_direction(), 0);
    }

    #[test]
    fn test_consume_edges_keeps_held_state() {
        let mut input = InputSnapshot {
            move_axes: Vec2::Y,
            jump_pressed: true,
            sprint_held: true,
            fire_held: true,
            interact_pressed: true,
            reload_pressed: true,
            drop_pressed: true,
            scroll_delta: -1.0,
            select_slot: Some(2),
            ..default()
        };

        input.consume_edges();

        assert_eq!(
            input,
            InputSnapshot {
                move_axes: Vec2::Y,
                sprint_held: true,
                fire_held: true,
                ..default()
            }
        );
    }

    #[test]
    fn test_consume_input_edges_system() {
        let mut world = World::new();
        let actor = world
            .spawn(ActorInput(InputSnapshot {
                jump_pressed: true,
                crouch_held: true,
                ..default()
            }))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(consume_input_edges);
        schedule.run(&mut world);

        let input = world.get::<ActorInput>(actor).map(|i| i.0);
        assert_eq!(
            input,
            Some(InputSnapshot {
                crouch_held: true,
                ..default()
            })
        );
    }

    #[test]
    fn test_pace_priority() {
        let mut input = InputSnapshot::default();
        assert_eq!(input.pace(), Pace::Walk);

        input.sprint_held = true;
        assert_eq!(input.pace(), Pace::Run);

        input.crouch_held = true;
        assert_eq!(input.pace(), Pace::Crouch);
    }
}
