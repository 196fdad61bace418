//! Best score record
//!
//! A single integer persisted under a fixed key. Missing or malformed data
//! loads as zero.

use crate::persistence::Storage;

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub value: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "sky_flap.high_score";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Parse a stored value. Anything that isn't a non-negative integer is zero.
    pub fn parse(raw: &str) -> u64 {
        serde_json::from_str::<u64>(raw.trim()).unwrap_or(0)
    }

    /// Load the best score from storage
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(raw) => {
                let value = Self::parse(&raw);
                if value == 0 && raw.trim() != "0" {
                    log::warn!("Ignoring malformed high score {:?}", raw);
                }
                log::info!("Loaded high score {}", value);
                Self { value }
            }
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Write the best score to storage
    pub fn save(&self, storage: &mut dyn Storage) {
        if let Ok(json) = serde_json::to_string(&self.value) {
            storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("High score saved ({})", self.value);
        }
    }

    /// Record a finished run. Returns true (and saves) only when it beats the record.
    pub fn record(&mut self, score: u64, storage: &mut dyn Storage) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        self.save(storage);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_missing_loads_zero() {
        let storage = MemoryStorage::new();
        assert_eq!(HighScore::load(&storage).value, 0);
    }

    #[test]
    fn test_malformed_loads_zero() {
        let mut storage = MemoryStorage::new();
        for raw in ["", "abc", "-4", "3.5", "{\"score\":3}", "null"] {
            storage.set_item(HighScore::STORAGE_KEY, raw);
            assert_eq!(HighScore::load(&storage).value, 0, "raw = {:?}", raw);
        }
    }

    #[test]
    fn test_record_only_improves() {
        let mut storage = MemoryStorage::new();
        let mut best = HighScore::new(10);
        assert!(!best.record(10, &mut storage));
        assert!(!best.record(3, &mut storage));
        assert_eq!(storage.get_item(HighScore::STORAGE_KEY), None);
        assert!(best.record(11, &mut storage));
        assert_eq!(best.value, 11);
        assert_eq!(storage.get_item(HighScore::STORAGE_KEY).as_deref(), Some("11"));
    }

    #[test]
    fn test_survives_reload() {
        let mut storage = MemoryStorage::new();
        let mut best = HighScore::load(&storage);
        best.record(27, &mut storage);
        drop(best);

        let reloaded = HighScore::load(&storage);
        assert_eq!(reloaded.value, 27);
    }
}
