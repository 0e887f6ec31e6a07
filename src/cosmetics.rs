//! Cosmetic unlocks
//!
//! Each unlock is a `"true"` string flag under its own LocalStorage key, set
//! once a run reaches the cosmetic's score threshold.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::platform::KeyValueStore;

/// Something the otter can wear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cosmetic {
    PartyHat,
    Sunglasses,
    Crown,
}

impl Cosmetic {
    pub const ALL: [Cosmetic; 3] = [Cosmetic::PartyHat, Cosmetic::Sunglasses, Cosmetic::Crown];

    pub fn id(self) -> &'static str {
        match self {
            Cosmetic::PartyHat => "party_hat",
            Cosmetic::Sunglasses => "sunglasses",
            Cosmetic::Crown => "crown",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Cosmetic::PartyHat => "Party Hat",
            Cosmetic::Sunglasses => "Sunglasses",
            Cosmetic::Crown => "Crown",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Score a single run needs to unlock this
    pub fn unlock_score(self) -> u64 {
        match self {
            Cosmetic::PartyHat => 500,
            Cosmetic::Sunglasses => 1500,
            Cosmetic::Crown => 5000,
        }
    }

    /// Drawing color (linear RGB)
    pub fn color(self) -> [f32; 3] {
        match self {
            Cosmetic::PartyHat => [0.9, 0.3, 0.8],
            Cosmetic::Sunglasses => [0.05, 0.05, 0.05],
            Cosmetic::Crown => [1.0, 0.85, 0.1],
        }
    }

    /// LocalStorage flag key
    pub fn storage_key(self) -> String {
        format!("otterRiver_unlock_{}", self.id())
    }
}

/// Whether the flag for `cosmetic` is set. Unreadable storage counts as locked.
pub fn is_unlocked(store: &dyn KeyValueStore, cosmetic: Cosmetic) -> bool {
    match store.get(&cosmetic.storage_key()) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            log::warn!("Failed to read unlock for {}: {}", cosmetic.id(), e);
            false
        }
    }
}

/// All cosmetics currently unlocked
pub fn unlocked(store: &dyn KeyValueStore) -> Vec<Cosmetic> {
    Cosmetic::ALL
        .into_iter()
        .filter(|c| is_unlocked(store, *c))
        .collect()
}

/// Set the flag for every cosmetic `score` earns that wasn't unlocked yet.
///
/// Returns the newly unlocked cosmetics.
pub fn unlock_for_score(
    store: &mut dyn KeyValueStore,
    score: u64,
) -> Result<Vec<Cosmetic>, StorageError> {
    let mut fresh = Vec::new();
    for cosmetic in Cosmetic::ALL {
        if score >= cosmetic.unlock_score() && !is_unlocked(store, cosmetic) {
            store.set(&cosmetic.storage_key(), "true")?;
            log::info!("Unlocked {}", cosmetic.display_name());
            fresh.push(cosmetic);
        }
    }
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_unlock_thresholds() {
        let mut store = MemoryStore::new();
        assert!(unlock_for_score(&mut store, 499).unwrap().is_empty());
        assert_eq!(
            unlock_for_score(&mut store, 1600).unwrap(),
            vec![Cosmetic::PartyHat, Cosmetic::Sunglasses]
        );
        // Already unlocked ones are not reported again
        assert_eq!(
            unlock_for_score(&mut store, 6000).unwrap(),
            vec![Cosmetic::Crown]
        );
        assert_eq!(unlocked(&store), Cosmetic::ALL.to_vec());
    }

    #[test]
    fn test_flag_format() {
        let mut store = MemoryStore::new();
        unlock_for_score(&mut store, 500).unwrap();
        assert_eq!(
            store.get("otterRiver_unlock_party_hat").unwrap().as_deref(),
            Some("true")
        );
        // Anything but "true" is locked
        store.set("otterRiver_unlock_crown", "yes").unwrap();
        assert!(!is_unlocked(&store, Cosmetic::Crown));
    }

    #[test]
    fn test_from_id() {
        for c in Cosmetic::ALL {
            assert_eq!(Cosmetic::from_id(c.id()), Some(c));
        }
        assert_eq!(Cosmetic::from_id("cape"), None);
    }
}
