//! Handoff to the external game engine

use crate::error::LaunchError;
use log::info;
use shared::{SessionConfig, PLAYER_NAME_VAR, SERVER_URL_VAR};
use std::process::{Child, Command};

/// Receives the resolved session parameters. Control does not come back.
pub trait Engine {
    fn start(&mut self, config: SessionConfig) -> Result<(), LaunchError>;
}

/// Runs the engine as its own process. The name and address reach it through
/// the `PLAYER_NAME` and `SERVER_URL` environment variables.
#[derive(Debug, Default)]
pub struct ProcessEngine {
    child: Option<Child>,
}

impl ProcessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(config: &SessionConfig) -> Command {
        let entry_point = config.entry_point();
        let mut command = Command::new(&entry_point.program);
        command
            .args(&entry_point.args)
            .env(PLAYER_NAME_VAR, config.name())
            .env(SERVER_URL_VAR, config.connection_address());
        command
    }

    /// Process id of the engine, once started
    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }
}

impl Engine for ProcessEngine {
    fn start(&mut self, config: SessionConfig) -> Result<(), LaunchError> {
        let child = Self::command(&config)
            .spawn()
            .map_err(|source| LaunchError::Engine {
                program: program_name(&config).to_string(),
                source,
            })?;

        info!("Engine `{}` started (pid {})", program_name(&config), child.id());
        self.child = Some(child);
        Ok(())
    }
}

fn program_name(config: &SessionConfig) -> &str {
    &config.entry_point().program
}
