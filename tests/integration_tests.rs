//! Integration tests for the bootstrap flow
//!
//! These tests drive the whole pre-game path against a mocked directory
//! service: fetch, state machine, persistence and engine handoff.

use client::bootstrap::{dispatch, BootstrapController, BootstrapState, Event, Surface};
use client::directory::DirectoryFetcher;
use client::engine::Engine;
use client::error::LaunchError;
use client::identity::IdentityStore;
use client::launcher::SessionLauncher;
use client::storage::JsonFileStore;
use shared::{Endpoint, EntryPoint, Identity, ServerEntry, ServerOption, SessionConfig};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct FakeSurface {
    labels: Vec<String>,
    selected: Option<ServerEntry>,
    error_shown: bool,
    launching: bool,
    torn_down: bool,
}

impl Surface for FakeSurface {
    fn show_servers(&mut self, options: &[ServerOption], selected: Option<&ServerEntry>) {
        self.labels = options.iter().map(|o| o.label.clone()).collect();
        self.selected = selected.cloned();
    }

    fn show_directory_error(&mut self) {
        self.error_shown = true;
    }

    fn show_launching(&mut self) {
        self.launching = true;
    }

    fn teardown(&mut self) {
        self.torn_down = true;
    }
}

#[derive(Default)]
struct FakeEngine {
    started: Vec<SessionConfig>,
}

impl Engine for FakeEngine {
    fn start(&mut self, config: SessionConfig) -> Result<(), LaunchError> {
        self.started.push(config);
        Ok(())
    }
}

async fn directory_service(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/serverinfo"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_server
}

fn identity_store(path: &Path) -> IdentityStore<JsonFileStore> {
    IdentityStore::new(JsonFileStore::open(path))
}

/// SCENARIO TESTS
mod scenario_tests {
    use super::*;

    /// Two servers, pick the second, launch as Nova
    #[tokio::test]
    async fn select_and_launch() {
        let mock_server = directory_service(200, r#"["/us-east", "/eu-west"]"#).await;
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("identity.json");

        let store = identity_store(&state_file);
        let mut controller = BootstrapController::new(store.load());
        let mut surface = FakeSurface::default();

        let result = DirectoryFetcher::new(format!("{}/serverinfo", mock_server.uri()))
            .fetch()
            .await;
        dispatch(&mut controller, &mut surface, Event::DirectorySettled(result));
        assert_eq!(surface.labels, vec!["US EAST", "EU WEST"]);

        dispatch(
            &mut controller,
            &mut surface,
            Event::ServerSelected(ServerEntry::new("/eu-west")),
        );
        dispatch(
            &mut controller,
            &mut surface,
            Event::NameChanged("Nova".to_string()),
        );
        let request = dispatch(&mut controller, &mut surface, Event::LaunchRequested)
            .expect("launch should be accepted");
        assert!(surface.launching);

        let launcher = SessionLauncher::new(
            store,
            FakeEngine::default(),
            Endpoint::new("localhost", 8000, false),
            EntryPoint::new("engine", Vec::new()),
        );
        let engine = launcher
            .launch(request.identity, request.server, &mut surface)
            .await
            .unwrap();

        assert!(surface.torn_down);
        assert_eq!(engine.started.len(), 1);
        assert_eq!(engine.started[0].name(), "Nova");
        assert_eq!(
            engine.started[0].connection_address(),
            "ws://localhost:8000/eu-west"
        );

        let persisted = identity_store(&state_file).load();
        assert_eq!(
            persisted,
            Identity::new("Nova", Some(ServerEntry::new("/eu-west")))
        );
    }

    /// Directory service answers 500
    #[tokio::test]
    async fn directory_failure_blocks_launch() {
        let mock_server = directory_service(500, "").await;
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("identity.json");

        let store = identity_store(&state_file);
        let mut controller = BootstrapController::new(store.load());
        let mut surface = FakeSurface::default();

        let result = DirectoryFetcher::new(format!("{}/serverinfo", mock_server.uri()))
            .fetch()
            .await;
        assert!(result.is_err());

        dispatch(&mut controller, &mut surface, Event::DirectorySettled(result));
        assert!(surface.error_shown);
        assert!(!controller.can_launch());

        let request = dispatch(&mut controller, &mut surface, Event::LaunchRequested);
        assert!(request.is_none());
        assert_eq!(controller.state(), &BootstrapState::DirectoryFailed);
        assert!(!surface.launching);
        assert!(!state_file.exists());
    }

    /// Directory service lists no servers
    #[tokio::test]
    async fn empty_directory_stays_ready() {
        let mock_server = directory_service(200, "[]").await;
        let mut controller = BootstrapController::new(Identity::default());
        let mut surface = FakeSurface::default();

        let result = DirectoryFetcher::new(format!("{}/serverinfo", mock_server.uri()))
            .fetch()
            .await;
        dispatch(&mut controller, &mut surface, Event::DirectorySettled(result));
        assert!(surface.labels.is_empty());

        let request = dispatch(&mut controller, &mut surface, Event::LaunchRequested);
        assert!(request.is_none());
        match controller.state() {
            BootstrapState::Ready(selection) => {
                assert!(selection.directory.is_empty());
                assert!(selection.server.is_none());
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    /// Malformed body counts as a failed fetch
    #[tokio::test]
    async fn malformed_directory_fails() {
        let mock_server = directory_service(200, "{\"servers\": 2}").await;
        let mut controller = BootstrapController::new(Identity::default());
        let mut surface = FakeSurface::default();

        let result = DirectoryFetcher::new(format!("{}/serverinfo", mock_server.uri()))
            .fetch()
            .await;
        dispatch(&mut controller, &mut surface, Event::DirectorySettled(result));
        assert!(controller.directory_failed());
        assert!(surface.error_shown);
    }
}

/// PERSISTENCE TESTS
mod persistence_tests {
    use super::*;

    /// A returning player gets the name and server they launched with last time
    #[tokio::test]
    async fn returning_player_is_prefilled() {
        let mock_server = directory_service(200, r#"["/us-east", "/eu-west"]"#).await;
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("identity.json");

        let mut store = identity_store(&state_file);
        store
            .save(&Identity::new("Nova", Some(ServerEntry::new("/eu-west"))))
            .unwrap();

        let store = identity_store(&state_file);
        let mut controller = BootstrapController::new(store.load());
        let mut surface = FakeSurface::default();

        let fetcher = DirectoryFetcher::new(format!("{}/serverinfo", mock_server.uri()));
        let result = fetcher.spawn(&tokio::runtime::Handle::current()).await.unwrap();
        dispatch(&mut controller, &mut surface, Event::DirectorySettled(result));

        assert_eq!(surface.selected, Some(ServerEntry::new("/eu-west")));
        match controller.state() {
            BootstrapState::Ready(selection) => assert_eq!(selection.name, "Nova"),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    /// Nothing is written until a launch is confirmed
    #[test]
    fn edits_are_not_persisted_before_launch() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("identity.json");

        let store = identity_store(&state_file);
        let mut controller = BootstrapController::new(store.load());
        let mut surface = FakeSurface::default();

        dispatch(
            &mut controller,
            &mut surface,
            Event::DirectorySettled(Ok(["/us-east"].into_iter().collect())),
        );
        dispatch(
            &mut controller,
            &mut surface,
            Event::NameChanged("Half-typed".to_string()),
        );

        assert!(!state_file.exists());
        assert_eq!(identity_store(&state_file).load(), Identity::default());
    }

    /// Launch persists before the engine sees the session
    #[test]
    fn launch_persists_with_zero_delay() {
        let dir = tempfile::tempdir().unwrap();
        let state_file = dir.path().join("identity.json");
        let mut surface = FakeSurface::default();

        let launcher = SessionLauncher::new(
            identity_store(&state_file),
            FakeEngine::default(),
            Endpoint::default(),
            EntryPoint::new("engine", Vec::new()),
        );
        let engine = tokio_test::block_on(launcher.launch(
            Identity::new("Nova", None),
            ServerEntry::new("/us-east"),
            &mut surface,
        ))
        .unwrap();

        assert_eq!(engine.started.len(), 1);
        assert_eq!(
            identity_store(&state_file).load().selected_server,
            Some(ServerEntry::new("/us-east"))
        );
    }
}
