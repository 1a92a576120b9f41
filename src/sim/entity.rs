//! Shared capabilities of everything that lives on the field

use serde::{Deserialize, Serialize};

use super::shape::{CollisionMask, Rect, Shape};

/// Kind tag for entity collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    GroundHazard,
    AirHazard,
    Platform,
}

/// An entity advanced once per tick and tested for collisions via its shape
pub trait Entity {
    fn kind(&self) -> EntityKind;

    /// Advance by one fixed timestep (seconds)
    fn update(&mut self, dt: f32);

    /// Current collision shape
    fn shape(&self) -> Shape<'_>;
}

/// Read-only snapshot of an entity for drawing
#[derive(Debug, Clone, Copy)]
pub struct EntityView<'a> {
    pub kind: EntityKind,
    pub rect: Rect,
    /// Silhouette, when the entity has one
    pub mask: Option<&'a CollisionMask>,
}

impl<'a> EntityView<'a> {
    pub fn of<E: Entity + ?Sized>(entity: &'a E) -> Self {
        let shape = entity.shape();
        Self {
            kind: entity.kind(),
            rect: shape.rect,
            mask: shape.mask,
        }
    }
}
