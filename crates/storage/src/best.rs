//! Best score kept under its own key, separate from the game record

use serde_json::Value;

use crate::core::{BestScoreStore, StoreError};
use crate::store::KeyValueStore;
use crate::types::BEST_SCORE_KEY;

/// [`BestScoreStore`] backed by any [`KeyValueStore`]
///
/// Accepts either a JSON number or a numeric string when reading; writes a
/// number.
#[derive(Debug, Clone)]
pub struct StoredBestScore<S> {
    store: S,
}

impl<S: KeyValueStore> StoredBestScore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

fn parse_best(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl<S: KeyValueStore> BestScoreStore for StoredBestScore<S> {
    fn load(&mut self) -> Result<u32, StoreError> {
        match self.store.get(BEST_SCORE_KEY)? {
            None => Ok(0),
            Some(value) => parse_best(&value).ok_or_else(|| StoreError::Malformed {
                key: BEST_SCORE_KEY.to_string(),
                reason: format!("not a score: {}", value),
            }),
        }
    }

    fn save(&mut self, best: u32) -> Result<(), StoreError> {
        self.store.set(BEST_SCORE_KEY, Value::from(best))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_missing_key_is_zero() {
        let mut best = StoredBestScore::new(MemoryStore::new());
        assert_eq!(best.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut best = StoredBestScore::new(store.clone());
        best.save(2048).unwrap();
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap(), Some(json!(2048)));
        assert_eq!(best.load().unwrap(), 2048);
    }

    #[test]
    fn test_numeric_string_accepted() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, json!("512")).unwrap();
        assert_eq!(StoredBestScore::new(store).load().unwrap(), 512);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, json!({"best": 1})).unwrap();
        assert!(matches!(
            StoredBestScore::new(store).load(),
            Err(StoreError::Malformed { .. })
        ));

        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, json!(-5)).unwrap();
        assert!(StoredBestScore::new(store).load().is_err());
    }
}
