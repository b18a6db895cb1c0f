//! Command-line configuration for the client binary

use crate::error::StoreError;
use crate::storage::{JsonFileStore, MemoryStore, Storage};
use clap::Parser;
use log::{info, warn};
use shared::{Endpoint, EntryPoint, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TRANSITION_DELAY_MS};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

static FROM_ARGS: OnceLock<ClientConfig> = OnceLock::new();

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ClientConfig {
    /// Host serving the server directory and the game sessions
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port serving the server directory and the game sessions
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Use https/wss instead of http/ws
    #[arg(long)]
    pub secure: bool,

    /// Engine executable started on launch
    #[arg(short, long, default_value = "engine")]
    pub engine: String,

    /// Extra argument passed to the engine (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    pub engine_args: Vec<String>,

    /// Where the name and last server are remembered
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Keep the identity in memory only
    #[arg(long, conflicts_with = "state_file")]
    pub no_persist: bool,

    /// Pause before handing off to the engine, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TRANSITION_DELAY_MS)]
    pub transition_delay_ms: u64,

    /// Pre-fill the name field instead of the remembered name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Window width
    #[arg(short = 'w', long, default_value = "480")]
    pub width: usize,

    /// Window height (no short flag to avoid conflict with --help)
    #[arg(long, default_value = "360")]
    pub height: usize,
}

impl ClientConfig {
    /// The process command line. Parsed on first call, shared afterwards, so
    /// the window setup and the client see the same values.
    pub fn from_args() -> &'static ClientConfig {
        Self::parse_once(&FROM_ARGS, Self::parse)
    }

    fn parse_once(cell: &OnceLock<Self>, parse: impl FnOnce() -> Self) -> &Self {
        cell.get_or_init(parse)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port, self.secure)
    }

    pub fn entry_point(&self) -> EntryPoint {
        EntryPoint::new(self.engine.clone(), self.engine_args.clone())
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    /// Picks the identity backend. Never fails: without a usable location
    /// the identity lives in memory for this run.
    pub fn open_storage(&self) -> Storage {
        self.storage_at(JsonFileStore::default_path())
    }

    fn storage_at(&self, default_path: Result<PathBuf, StoreError>) -> Storage {
        if self.no_persist {
            return Storage::Memory(MemoryStore::new());
        }

        let path = match (&self.state_file, default_path) {
            (Some(path), _) => path.clone(),
            (None, Ok(path)) => path,
            (None, Err(e)) => {
                warn!("Identity will not be remembered: {}", e);
                return Storage::Memory(MemoryStore::new());
            }
        };

        let store = JsonFileStore::open(path);
        info!("Identity stored at {}", store.path().display());
        Storage::File(store)
    }
}
