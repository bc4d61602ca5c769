//! Physics boundary
//!
//! Ядро геймплея не знает о физическом движке: только raycast capability
//! (`PhysicsQuery`) и motion collaborator (displacement → тело).

pub mod motion;
pub mod query;

// Re-export основных типов
pub use motion::{
    apply_displacement_headless, apply_displacement_to_character_bodies, character_body,
    loose_weapon_body, Displacement,
};
pub use query::{
    GroundProbe, PhysicsQuery, ProbeVolume, RayFilter, RayHit, RaycastGroundProbe, SceneQuery,
    VolumeScene,
};
