use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Schema-less attribute map of an entity (e.g. `{"x": 1, "y": 2}`)
///
/// Payloads are opaque: keys and values pass through verbatim.
pub type Attributes = Map<String, Value>;

/// Entity id -> attributes. Used for the world itself and for listener diffs.
pub type WorldView = BTreeMap<String, Attributes>;
