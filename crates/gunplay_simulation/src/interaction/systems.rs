//! Interaction systems (FixedUpdate, фаза Interaction)

use bevy::prelude::*;

use super::probe::{probe, Interactable, InteractionProbe};
use crate::actor::Aim;
use crate::input::ActorInput;
use crate::physics::{RayFilter, SceneQuery};

/// Event: target под прицелом сменился (UI показывает/прячет title)
#[derive(Event, Debug, Clone)]
pub struct InteractionTargetChanged {
    pub actor: Entity,
    pub target: Option<Entity>,
    pub title: Option<String>,
}

/// Event: interact по target'у без pickup affordance (двери, терминалы…)
#[derive(Event, Debug, Clone)]
pub struct Interacted {
    pub actor: Entity,
    pub target: Entity,
    pub title: String,
}

/// System: eye ray → InteractionProbe.current
pub fn probe_interactables(
    scene: SceneQuery,
    mut actors: Query<(Entity, &Transform, &Aim, &mut InteractionProbe)>,
    interactables: Query<&Interactable>,
    mut changed: EventWriter<InteractionTargetChanged>,
) {
    let physics = scene.snapshot();

    for (entity, transform, aim, mut interaction) in actors.iter_mut() {
        let target = probe(
            &physics,
            aim.eye_ray(transform),
            interaction.range,
            &RayFilter::excluding(entity),
            |surface| interactables.contains(surface),
        );

        if interaction.update(target) {
            let title = target
                .and_then(|target| interactables.get(target).ok())
                .map(|interactable| interactable.title.clone());
            changed.write(InteractionTargetChanged {
                actor: entity,
                target,
                title,
            });
        }
    }
}

/// System: interact без pickup → Interacted
///
/// Pickup'ы (Interactable с оружием) обрабатывает inventory::pick_up_weapons.
pub fn report_interactions(
    actors: Query<(Entity, &ActorInput, &InteractionProbe)>,
    interactables: Query<&Interactable>,
    mut interacted: EventWriter<Interacted>,
) {
    for (entity, input, interaction) in actors.iter() {
        if !input.0.interact_pressed {
            continue;
        }
        let Some(target) = interaction.current else {
            continue;
        };
        let Ok(interactable) = interactables.get(target) else {
            continue;
        };
        if interactable.is_pickup() {
            continue;
        }

        crate::log(&format!("Actor {:?} interacted with '{}'", entity, interactable.title));
        interacted.write(Interacted {
            actor: entity,
            target,
            title: interactable.title.clone(),
        });
    }
}
