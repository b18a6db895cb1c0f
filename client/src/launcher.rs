//! Turns a confirmed launch into a running engine session

use crate::bootstrap::Surface;
use crate::engine::Engine;
use crate::error::LaunchError;
use crate::identity::IdentityStore;
use crate::storage::KeyValueStore;
use log::{info, warn};
use shared::{Endpoint, EntryPoint, Identity, ServerEntry, SessionConfig};
use std::time::Duration;
use tokio::time::sleep;

pub struct SessionLauncher<K, E> {
    store: IdentityStore<K>,
    engine: E,
    endpoint: Endpoint,
    entry_point: EntryPoint,
    transition_delay: Duration,
}

impl<K: KeyValueStore, E: Engine> SessionLauncher<K, E> {
    pub fn new(
        store: IdentityStore<K>,
        engine: E,
        endpoint: Endpoint,
        entry_point: EntryPoint,
    ) -> Self {
        Self {
            store,
            engine,
            endpoint,
            entry_point,
            transition_delay: Duration::ZERO,
        }
    }

    /// Pause between confirmation and teardown so the transition is visible.
    /// Zero skips it.
    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = delay;
        self
    }

    /// Persists the selection, tears down `surface` and hands the session to
    /// the engine. Consumes the launcher: a session is launched at most once.
    ///
    /// Returns the engine so the caller can keep it alive.
    pub async fn launch<S: Surface + ?Sized>(
        mut self,
        identity: Identity,
        selected: ServerEntry,
        surface: &mut S,
    ) -> Result<E, LaunchError> {
        let frozen = Identity::new(identity.display_name, Some(selected.clone()));

        // Must land before the engine runs
        if let Err(e) = self.store.save(&frozen) {
            warn!("Could not persist identity: {}", e);
        }

        let address = self.endpoint.session_url(&selected);
        let config = SessionConfig::new(frozen.display_name, address, self.entry_point);

        if !self.transition_delay.is_zero() {
            sleep(self.transition_delay).await;
        }

        surface.teardown();

        info!(
            "Handing off to engine: {} as {:?}",
            config.connection_address(),
            config.name()
        );
        self.engine.start(config)?;
        Ok(self.engine)
    }
}
