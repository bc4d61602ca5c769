//! Interaction domain: forward probe → interactable target

use bevy::prelude::*;

pub mod probe;
pub mod systems;

// Re-export
pub use probe::{probe, Interactable, InteractionProbe};
pub use systems::{probe_interactables, report_interactions, Interacted, InteractionTargetChanged};

use crate::GameplaySet;

/// Interaction Plugin (фаза Interaction)
///
/// 1. probe_interactables: eye ray → InteractionProbe.current
/// 2. report_interactions: interact без pickup → Interacted
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InteractionTargetChanged>()
            .add_event::<Interacted>()
            .add_systems(
                FixedUpdate,
                (probe_interactables, report_interactions)
                    .chain()
                    .in_set(GameplaySet::Interaction),
            );
    }
}
