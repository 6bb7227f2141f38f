//! Entity records and the slot store that owns them.
//!
//! Slot indices double as the ids fed to the quadtree, so an id stays
//! stable for the entity's whole life. Freed slots are reused.

use crate::spring::Spring;
use collisions::Body;
use common::shapes::Aabb;
use nalgebra::Vector2;
use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
}

/// Gameplay tag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tags(u8);

impl Tags {
    pub const NONE: Tags = Tags(0);
    /// Destroys destructible entities it touches.
    pub const LETHAL: Tags = Tags(1 << 0);
    /// Can be destroyed by a lethal entity.
    pub const DESTRUCTIBLE: Tags = Tags(1 << 1);

    pub fn contains(self, other: Tags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Tags) {
        self.0 |= other.0;
    }

    pub fn is_lethal(self) -> bool {
        self.contains(Tags::LETHAL)
    }

    pub fn is_destructible(self) -> bool {
        self.contains(Tags::DESTRUCTIBLE)
    }
}

impl BitOr for Tags {
    type Output = Tags;

    fn bitor(self, rhs: Tags) -> Tags {
        Tags(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub radius: f32,
    pub color_slot: usize,
    pub tags: Tags,
    /// Radius animation; present while growing in or collapsing out.
    pub spring: Option<Spring>,
    /// Enemies pick a random heading once, on their first step.
    pub heading_set: bool,
}

impl Entity {
    pub fn new(kind: EntityKind, position: Vector2<f32>, radius: f32, color_slot: usize) -> Self {
        Entity {
            kind,
            position,
            velocity: Vector2::zeros(),
            radius,
            color_slot,
            tags: Tags::NONE,
            spring: None,
            heading_set: false,
        }
    }

    pub fn body(&self) -> Body {
        Body::new(self.position, self.velocity, self.radius)
    }

    pub fn apply_body(&mut self, body: &Body) {
        self.position = body.position;
        self.velocity = body.velocity;
    }

    pub fn bounds(&self) -> Aabb {
        self.body().bounds()
    }

    /// Collapsing towards removal.
    pub fn is_dying(&self) -> bool {
        self.spring.map_or(false, |spring| spring.collapses())
    }
}

#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    slots: Vec<Option<Entity>>,
    free: Vec<u32>,
    len: usize,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) -> EntityId {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(entity);
                EntityId(index)
            }
            None => {
                self.slots.push(Some(entity));
                EntityId((self.slots.len() - 1) as u32)
            }
        }
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.slots.get_mut(id.0 as usize)?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(entity)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.0 as usize)?.as_mut()
    }

    /// Looks up an entity by the raw index stored in the quadtree.
    pub fn id_at(&self, index: u32) -> Option<EntityId> {
        let id = EntityId(index);
        self.get(id).map(|_| id)
    }

    /// Two distinct live entities at once.
    pub fn pair_mut(&mut self, a: EntityId, b: EntityId) -> Option<(&mut Entity, &mut Entity)> {
        let (i, j) = (a.0 as usize, b.0 as usize);
        if i == j || i.max(j) >= self.slots.len() {
            return None;
        }
        if i < j {
            let (low, high) = self.slots.split_at_mut(j);
            Some((low[i].as_mut()?, high[0].as_mut()?))
        } else {
            let (low, high) = self.slots.split_at_mut(i);
            Some((high[0].as_mut()?, low[j].as_mut()?))
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Slots ever allocated, live or free. Every index is below this.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (EntityId(i as u32), e)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut Entity)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|e| (EntityId(i as u32), e)))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}
