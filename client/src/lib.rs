//! # Lobby Bootstrap Client
//!
//! This library provides the pre-game layer of the multiplayer client: it
//! discovers joinable game servers, captures the player's identity, and hands
//! the resolved session parameters to the external game engine. Nothing here
//! touches game logic or the live-session wire protocol; once the engine has
//! been started, this layer's work is done.
//!
//! ## Architecture Overview
//!
//! The bootstrap runs as a small, single-threaded, event-driven loop around
//! one explicit state machine:
//!
//! ```text
//! AwaitingDirectory --fetch ok--> Ready --confirm--> Launching
//!         |
//!         +--fetch failed--> DirectoryFailed
//! ```
//!
//! ### One Fetch, One Owner
//! The server directory is requested exactly once at startup. The result is
//! delivered to the state machine as an event; there is no retry and no
//! cancellation. A failed fetch is permanent for the run and disables launch.
//!
//! ### Pure Transitions
//! State changes are computed by a pure function from `(state, event)` to
//! `(state, effects)`. The controller owns the state; the landing surface only
//! renders effects and feeds user input back as events.
//!
//! ### Explicit Handoff
//! The engine receives a single immutable `SessionConfig`. The identity is
//! persisted before the engine starts, so a crashing engine never loses the
//! player's latest choice.
//!
//! ## Module Organization
//!
//! ### Bootstrap Module (`bootstrap`)
//! - `BootstrapState`, events, effects and the `transition` function
//! - `BootstrapController`, the single owner of the state
//! - The `Surface` seam and `dispatch`
//!
//! ### Directory Module (`directory`)
//! - One-shot `GET /serverinfo` request
//! - Response validation and parsing
//!
//! ### Identity and Storage Modules (`identity`, `storage`)
//! - Name and last server under the fixed `name` / `server` keys
//! - JSON file and in-memory key-value backends
//!
//! ### Launcher and Engine Modules (`launcher`, `engine`)
//! - Persist, build the connection address, tear down, hand off
//! - Process-based engine that receives `PLAYER_NAME` and `SERVER_URL`
//!
//! ### Input and Rendering Modules (`input`, `rendering`)
//! - Confirm key routing
//! - The macroquad landing window
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::bootstrap::{BootstrapController, Event};
//! use client::directory::DirectoryFetcher;
//! use client::identity::IdentityStore;
//! use client::storage::MemoryStore;
//! use shared::Endpoint;
//!
//! # async fn example() {
//! let store = IdentityStore::new(MemoryStore::new());
//! let mut controller = BootstrapController::new(store.load());
//!
//! let endpoint = Endpoint::default();
//! let result = DirectoryFetcher::new(endpoint.directory_url()).fetch().await;
//! controller.handle(Event::DirectorySettled(result));
//! controller.handle(Event::NameChanged("Nova".to_string()));
//!
//! // Effects now carry the launch request for the session launcher
//! let effects = controller.handle(Event::LaunchRequested);
//! # let _ = effects;
//! # }
//! ```

pub mod bootstrap;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod identity;
pub mod input;
pub mod launcher;
pub mod rendering;
pub mod storage;
