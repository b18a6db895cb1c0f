//! Pre-game state machine: directory loading, selection, launch confirmation

use crate::directory::DirectoryResult;
use crate::error::BootstrapError;
use log::{debug, info, warn};
use shared::{Identity, ServerDirectory, ServerEntry, ServerOption};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    /// Waiting for the one directory fetch. Holds the pre-filled identity,
    /// which the name field may edit meanwhile.
    AwaitingDirectory { draft: Identity },
    Ready(Selection),
    DirectoryFailed,
    Launching(LaunchRequest),
}

impl BootstrapState {
    pub fn name(&self) -> &'static str {
        match self {
            BootstrapState::AwaitingDirectory { .. } => "awaiting directory",
            BootstrapState::Ready(_) => "ready",
            BootstrapState::DirectoryFailed => "directory failed",
            BootstrapState::Launching(_) => "launching",
        }
    }
}

/// In-progress form values while `Ready`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub directory: ServerDirectory,
    pub name: String,
    pub server: Option<ServerEntry>,
}

impl Selection {
    /// Prefers the persisted server when the directory still lists it,
    /// otherwise the first entry.
    fn new(directory: ServerDirectory, draft: Identity) -> Self {
        let server = draft
            .selected_server
            .filter(|server| directory.contains(server))
            .or_else(|| directory.get(0).cloned());

        Self {
            directory,
            name: draft.display_name,
            server,
        }
    }

    fn step(&mut self, forward: bool) {
        let len = self.directory.len();
        if len == 0 {
            return;
        }

        let current = self
            .server
            .as_ref()
            .and_then(|server| self.directory.position(server));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.server = self.directory.get(next).cloned();
    }

    /// The selected server, if it can be connected to
    fn launch_target(&self) -> Option<&ServerEntry> {
        self.server.as_ref().filter(|server| !server.is_empty())
    }

    fn show(&self) -> Effect {
        Effect::ShowServers {
            options: self.directory.options(),
            selected: self.server.clone(),
        }
    }
}

/// Frozen values handed to the session launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub identity: Identity,
    pub server: ServerEntry,
}

#[derive(Debug, Clone)]
pub enum Event {
    DirectorySettled(DirectoryResult),
    NameChanged(String),
    ServerSelected(ServerEntry),
    SelectNext,
    SelectPrevious,
    LaunchRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ShowServers {
        options: Vec<ServerOption>,
        selected: Option<ServerEntry>,
    },
    ShowDirectoryError,
    Launch(LaunchRequest),
}

/// Outcome of one transition. `rejected` is set when a launch was ignored.
#[derive(Debug)]
pub struct Transition {
    pub state: BootstrapState,
    pub effects: Vec<Effect>,
    pub rejected: Option<BootstrapError>,
}

impl Transition {
    fn to(state: BootstrapState, effects: Vec<Effect>) -> Self {
        Self {
            state,
            effects,
            rejected: None,
        }
    }

    fn stay(state: BootstrapState) -> Self {
        Self::to(state, Vec::new())
    }

    fn reject(state: BootstrapState, reason: &'static str) -> Self {
        Self {
            state,
            effects: Vec::new(),
            rejected: Some(BootstrapError::InvalidLaunchAttempt { reason }),
        }
    }
}

pub fn transition(state: BootstrapState, event: Event) -> Transition {
    match (state, event) {
        (BootstrapState::AwaitingDirectory { draft }, Event::DirectorySettled(Ok(directory))) => {
            let selection = Selection::new(directory, draft);
            let effect = selection.show();
            Transition::to(BootstrapState::Ready(selection), vec![effect])
        }
        (BootstrapState::AwaitingDirectory { .. }, Event::DirectorySettled(Err(_))) => {
            Transition::to(
                BootstrapState::DirectoryFailed,
                vec![Effect::ShowDirectoryError],
            )
        }
        (BootstrapState::AwaitingDirectory { mut draft }, Event::NameChanged(name)) => {
            draft.display_name = name;
            Transition::stay(BootstrapState::AwaitingDirectory { draft })
        }
        (state @ BootstrapState::AwaitingDirectory { .. }, Event::LaunchRequested) => {
            Transition::reject(state, "server directory has not loaded yet")
        }

        (BootstrapState::Ready(mut selection), Event::NameChanged(name)) => {
            selection.name = name;
            Transition::stay(BootstrapState::Ready(selection))
        }
        (BootstrapState::Ready(mut selection), Event::ServerSelected(server)) => {
            if !selection.directory.contains(&server) {
                return Transition::stay(BootstrapState::Ready(selection));
            }
            selection.server = Some(server);
            let effect = selection.show();
            Transition::to(BootstrapState::Ready(selection), vec![effect])
        }
        (BootstrapState::Ready(mut selection), Event::SelectNext) => {
            selection.step(true);
            let effect = selection.show();
            Transition::to(BootstrapState::Ready(selection), vec![effect])
        }
        (BootstrapState::Ready(mut selection), Event::SelectPrevious) => {
            selection.step(false);
            let effect = selection.show();
            Transition::to(BootstrapState::Ready(selection), vec![effect])
        }
        (BootstrapState::Ready(selection), Event::LaunchRequested) => {
            let Some(server) = selection.launch_target().cloned() else {
                return Transition::reject(
                    BootstrapState::Ready(selection),
                    "no server selected",
                );
            };
            let request = LaunchRequest {
                identity: Identity::new(selection.name, Some(server.clone())),
                server,
            };
            Transition::to(
                BootstrapState::Launching(request.clone()),
                vec![Effect::Launch(request)],
            )
        }

        (state @ BootstrapState::DirectoryFailed, Event::LaunchRequested) => {
            Transition::reject(state, "server directory unavailable")
        }
        (state @ BootstrapState::Launching(_), Event::LaunchRequested) => {
            Transition::reject(state, "already launching")
        }

        // Everything else leaves the state untouched
        (state, _) => Transition::stay(state),
    }
}

/// Owns the bootstrap state and applies events to it in order
pub struct BootstrapController {
    state: BootstrapState,
}

impl BootstrapController {
    /// Starts awaiting the directory, with `prefill` from the identity store
    pub fn new(prefill: Identity) -> Self {
        Self {
            state: BootstrapState::AwaitingDirectory { draft: prefill },
        }
    }

    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        if let Event::DirectorySettled(Err(e)) = &event {
            warn!("{}", BootstrapError::from(e.clone()));
        }

        let state = std::mem::replace(&mut self.state, BootstrapState::DirectoryFailed);
        let from = state.name();
        let outcome = transition(state, event);
        self.state = outcome.state;

        if let Some(rejected) = outcome.rejected {
            debug!("{}", rejected);
        }
        if from != self.state.name() {
            info!("Bootstrap {} -> {}", from, self.state.name());
        }

        outcome.effects
    }

    /// Whether the launch affordance should be enabled
    pub fn can_launch(&self) -> bool {
        matches!(&self.state, BootstrapState::Ready(selection) if selection.launch_target().is_some())
    }

    pub fn directory_failed(&self) -> bool {
        matches!(self.state, BootstrapState::DirectoryFailed)
    }
}

/// Landing surface the controller's effects are rendered on
pub trait Surface {
    fn show_servers(&mut self, options: &[ServerOption], selected: Option<&ServerEntry>);
    fn show_directory_error(&mut self);
    fn show_launching(&mut self);
    /// One-way: nothing is shown after this.
    fn teardown(&mut self);
}

/// Feeds `event` through the controller, renders the resulting effects on
/// `surface` and returns the launch request if the event confirmed one.
pub fn dispatch<S: Surface + ?Sized>(
    controller: &mut BootstrapController,
    surface: &mut S,
    event: Event,
) -> Option<LaunchRequest> {
    let mut launch = None;
    for effect in controller.handle(event) {
        match effect {
            Effect::ShowServers { options, selected } => {
                surface.show_servers(&options, selected.as_ref())
            }
            Effect::ShowDirectoryError => surface.show_directory_error(),
            Effect::Launch(request) => {
                surface.show_launching();
                launch = Some(request);
            }
        }
    }
    launch
}
