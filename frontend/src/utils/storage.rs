//! Key-value persistence behind the session layer.
//!
//! On wasm this is `window.localStorage`; on the host it is a thread-local
//! map so server-side rendering and tests run through the same call sites.

#[cfg(target_arch = "wasm32")]
mod backend {
    use web_sys::{Storage, Window};

    fn window() -> Result<Window, String> {
        web_sys::window().ok_or_else(|| "No window object".to_string())
    }

    fn local_storage() -> Result<Storage, String> {
        window()?
            .local_storage()
            .map_err(|_| "No localStorage".to_string())?
            .ok_or_else(|| "No localStorage".to_string())
    }

    pub fn get_item(key: &str) -> Result<Option<String>, String> {
        local_storage()?
            .get_item(key)
            .map_err(|e| format!("Failed to read {}: {:?}", key, e))
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| format!("Failed to write {}: {:?}", key, e))
    }

    pub fn remove_item(key: &str) -> Result<(), String> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| format!("Failed to remove {}: {:?}", key, e))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::cell::RefCell;
    use std::collections::HashMap;

    thread_local! {
        static STORE: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    }

    pub fn get_item(key: &str) -> Result<Option<String>, String> {
        STORE.with(|store| Ok(store.borrow().get(key).cloned()))
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        STORE.with(|store| {
            store.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    pub fn remove_item(key: &str) -> Result<(), String> {
        STORE.with(|store| {
            store.borrow_mut().remove(key);
            Ok(())
        })
    }

    /// Wipes the thread-local store. Tests only.
    pub fn clear() {
        STORE.with(|store| store.borrow_mut().clear());
    }
}

pub use backend::{get_item, remove_item, set_item};

#[cfg(not(target_arch = "wasm32"))]
pub use backend::clear;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        clear();
        assert_eq!(get_item("token"), Ok(None));

        set_item("token", "abc123").unwrap();
        assert_eq!(get_item("token"), Ok(Some("abc123".to_string())));

        remove_item("token").unwrap();
        assert_eq!(get_item("token"), Ok(None));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        clear();
        assert!(remove_item("nothing-here").is_ok());
    }
}
