#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::HashMap;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use hashbrown::HashMap;
}

/// Map keyed by timer or animation id, using the active default hasher.
pub type IdMap<K, V> = map::HashMap<K, V, crate::hash::BuildDefaultHasher>;
