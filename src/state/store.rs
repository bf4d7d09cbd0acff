use crate::state::entity::{Attributes, WorldView};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// World store holds the canonical entity table and one pending diff per listener.
///
/// Lock order is always world first, then listener shards. Every mutation of the
/// world fans out to the listeners while the world write lock is still held, so
/// registration and world reads never observe a half-applied write. Draining only
/// takes the listener's shard lock.
pub struct WorldStore {
    /// Canonical world (entity id -> attributes)
    world: RwLock<WorldView>,

    /// Pending diff per listener id, written on every entity mutation
    listeners: DashMap<String, WorldView>,
}

impl WorldStore {
    /// Create an empty store with no listeners
    pub fn new() -> Self {
        Self {
            world: RwLock::new(WorldView::new()),
            listeners: DashMap::new(),
        }
    }

    fn read_world(&self) -> RwLockReadGuard<'_, WorldView> {
        self.world.read().expect("world lock poisoned")
    }

    fn write_world(&self) -> RwLockWriteGuard<'_, WorldView> {
        self.world.write().expect("world lock poisoned")
    }

    /// Replace an entity's attributes (full replace, not merge)
    ///
    /// Returns the stored attributes. Every registered listener has the new value
    /// pending before this returns.
    pub fn set_entity(&self, entity_id: &str, attributes: Attributes) -> Attributes {
        let mut world = self.write_world();
        world.insert(entity_id.to_string(), attributes.clone());
        let notified = self.notify_all(entity_id, &attributes);

        debug!(entity_id = %entity_id, listeners = notified, "Entity set");
        attributes
    }

    /// Merge a single key into an entity, creating the entity if absent
    pub fn update_entity(&self, entity_id: &str, key: &str, value: Value) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(key.to_string(), value);
        self.merge_entity(entity_id, attributes)
    }

    /// Merge every key of `attributes` into an entity, creating it if absent
    ///
    /// Listeners receive the merged map, fanned out once for the whole batch.
    pub fn merge_entity(&self, entity_id: &str, attributes: Attributes) -> Attributes {
        let mut world = self.write_world();
        let entry = world.entry(entity_id.to_string()).or_default();
        for (key, value) in attributes {
            entry.insert(key, value);
        }
        let merged = entry.clone();
        let notified = self.notify_all(entity_id, &merged);

        debug!(entity_id = %entity_id, listeners = notified, "Entity merged");
        merged
    }

    /// Get an entity's attributes, empty if the entity does not exist
    pub fn get_entity(&self, entity_id: &str) -> Attributes {
        self.read_world().get(entity_id).cloned().unwrap_or_default()
    }

    /// Point-in-time copy of the whole world
    pub fn world(&self) -> WorldView {
        self.read_world().clone()
    }

    /// Empty the world. Pending listener diffs are left untouched.
    ///
    /// Returns the resulting (empty) world.
    pub fn clear_world(&self) -> WorldView {
        let mut world = self.write_world();
        let removed = world.len();
        world.clear();

        info!(removed = removed, "World cleared");
        world.clone()
    }

    /// Empty the world and drop every listener
    pub fn reset(&self) -> WorldView {
        let mut world = self.write_world();
        let removed = world.len();
        world.clear();
        let dropped = self.listeners.len();
        self.listeners.clear();

        info!(removed = removed, listeners = dropped, "World reset");
        world.clone()
    }

    /// Create or re-seed a listener with a copy of the current world
    pub fn register_listener(&self, listener_id: &str) {
        // Held until the seed is installed so no write slips between copy and insert
        let world = self.read_world();
        self.listeners.insert(listener_id.to_string(), world.clone());

        info!(
            listener_id = %listener_id,
            seeded = world.len(),
            "Listener registered"
        );
    }

    /// Take a listener's pending diff, leaving it empty
    ///
    /// Unknown listeners drain to an empty view and are not created.
    pub fn drain_listener(&self, listener_id: &str) -> WorldView {
        let drained = match self.listeners.get_mut(listener_id) {
            Some(mut pending) => std::mem::take(pending.value_mut()),
            None => WorldView::new(),
        };

        debug!(listener_id = %listener_id, changes = drained.len(), "Listener drained");
        drained
    }

    /// Whether a listener with this id is registered
    pub fn is_listener(&self, listener_id: &str) -> bool {
        self.listeners.contains_key(listener_id)
    }

    pub fn entity_count(&self) -> usize {
        self.read_world().len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Record `attributes` as the latest pending value of `entity_id` for every
    /// listener. Callers must hold the world write lock.
    fn notify_all(&self, entity_id: &str, attributes: &Attributes) -> usize {
        let mut notified = 0;
        for mut pending in self.listeners.iter_mut() {
            pending
                .value_mut()
                .insert(entity_id.to_string(), attributes.clone());
            notified += 1;
        }
        notified
    }
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new()
    }
}
