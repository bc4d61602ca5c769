//! Movement systems (FixedUpdate, фаза Movement)

use bevy::prelude::*;

use super::controller::{MoveIntent, MovementController};
use crate::input::ActorInput;
use crate::physics::{Displacement, RayFilter, RaycastGroundProbe, SceneQuery};

/// Event: актор оторвался от земли прыжком
#[derive(Event, Debug, Clone)]
pub struct Jumped {
    pub entity: Entity,
    pub jumps_used: u32,
    pub vertical_velocity: f32,
}

/// System: input → MovementController → Displacement
///
/// Ground probe: downward ray от pivot'а (ноги) длиной `ground_ray_distance`,
/// собственный volume актора исключён.
pub fn drive_movement(
    scene: SceneQuery,
    mut actors: Query<(
        Entity,
        &Transform,
        &ActorInput,
        &mut MovementController,
        &mut Displacement,
    )>,
    mut jumped: EventWriter<Jumped>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let physics = scene.snapshot();

    for (entity, transform, input, mut controller, mut displacement) in actors.iter_mut() {
        let snapshot = &input.0;
        let intent = MoveIntent {
            axes: snapshot.move_axes,
            jump: snapshot.jump_pressed,
            pace: snapshot.pace(),
        };
        let ground = RaycastGroundProbe {
            physics: &physics,
            feet: transform.translation,
            filter: RayFilter::excluding(entity),
        };

        displacement.0 += controller.tick(&intent, transform.rotation, &ground, delta);

        if controller.jumped {
            jumped.write(Jumped {
                entity,
                jumps_used: controller.jumps_used(),
                vertical_velocity: controller.vertical_velocity,
            });
        }
    }
}
