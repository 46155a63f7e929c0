use dashboard_core::{KeyValueStore, StorageError};
use gloo::storage::{LocalStorage, Storage};

/// Browser LocalStorage, holding plain string values
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("⚠️ LocalStorage read of {} failed: {:?}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_plain_string() {
        let store = LocalStorageStore;
        store.set("lastAIRequest", "1700000000000").unwrap();
        assert_eq!(store.get("lastAIRequest").as_deref(), Some("1700000000000"));
    }
}
