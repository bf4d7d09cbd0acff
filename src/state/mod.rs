// Shared world state and listener fan-out

mod entity;
mod store;

pub use entity::{Attributes, WorldView};
pub use store::WorldStore;
