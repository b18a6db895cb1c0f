//! Persisted player identity: display name and last selected server

use crate::error::StoreError;
use crate::storage::KeyValueStore;
use log::debug;
use shared::{Identity, ServerEntry, NAME_KEY, SERVER_KEY};

pub struct IdentityStore<K> {
    store: K,
}

impl<K: KeyValueStore> IdentityStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Reads the persisted identity. Absent values come back empty.
    pub fn load(&self) -> Identity {
        let display_name = self.store.get(NAME_KEY).unwrap_or_default();
        let selected_server = self
            .store
            .get(SERVER_KEY)
            .filter(|server| !server.is_empty())
            .map(ServerEntry::new);

        debug!(
            "Loaded identity: name={:?} server={:?}",
            display_name, selected_server
        );

        Identity {
            display_name,
            selected_server,
        }
    }

    /// Writes both fields. Only called once a launch is confirmed.
    pub fn save(&mut self, identity: &Identity) -> Result<(), StoreError> {
        let server = identity
            .selected_server
            .as_ref()
            .map(ServerEntry::as_str)
            .unwrap_or_default();
        self.store
            .set_many(&[(NAME_KEY, &identity.display_name), (SERVER_KEY, server)])
    }

    pub fn into_inner(self) -> K {
        self.store
    }
}
