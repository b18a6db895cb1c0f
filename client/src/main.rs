use client::bootstrap::{dispatch, BootstrapController, Event, LaunchRequest};
use client::config::ClientConfig;
use client::directory::{DirectoryFetcher, DirectoryResult};
use client::engine::ProcessEngine;
use client::error::FetchError;
use client::identity::IdentityStore;
use client::input::InputRouter;
use client::launcher::SessionLauncher;
use client::rendering::LandingPage;
use log::{error, info};
use macroquad::prelude::*;
use tokio::sync::oneshot::{self, error::TryRecvError};

fn window_conf() -> Conf {
    let config = ClientConfig::from_args();
    Conf {
        window_title: "Lobby".to_owned(),
        window_width: config.width as i32,
        window_height: config.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    if let Err(e) = run(ClientConfig::from_args()).await {
        error!("{}", e);
    }
}

async fn run(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;

    let store = IdentityStore::new(config.open_storage());
    let mut prefill = store.load();
    if let Some(name) = &config.name {
        prefill.display_name = name.clone();
    }

    let endpoint = config.endpoint();
    info!("Starting client...");
    info!("Session host: {}:{}", endpoint.host, endpoint.port);

    let mut directory = Some(DirectoryFetcher::new(endpoint.directory_url()).spawn(runtime.handle()));

    let mut controller = BootstrapController::new(prefill.clone());
    let mut page = LandingPage::new(config.width, config.height, prefill.display_name);
    let router = InputRouter::new();

    let request: LaunchRequest = loop {
        let mut events = Vec::new();
        if let Some(result) = poll_directory(&mut directory) {
            events.push(Event::DirectorySettled(result));
        }
        events.extend(page.read_form());
        events.extend(router.poll());

        let mut launch = None;
        for event in events {
            if let Some(request) = dispatch(&mut controller, &mut page, event) {
                launch = Some(request);
            }
        }

        page.render(controller.can_launch());
        next_frame().await;

        if let Some(request) = launch {
            break request;
        }
    };

    let launcher = SessionLauncher::new(store, ProcessEngine::new(), endpoint, config.entry_point())
        .with_transition_delay(config.transition_delay());
    let engine = runtime.block_on(launcher.launch(request.identity, request.server, &mut page))?;

    info!("Handed off to engine (pid {:?})", engine.pid());
    Ok(())
}

/// Takes the directory result once it has settled
fn poll_directory(
    directory: &mut Option<oneshot::Receiver<DirectoryResult>>,
) -> Option<DirectoryResult> {
    let result = match directory.as_mut()?.try_recv() {
        Ok(result) => result,
        Err(TryRecvError::Empty) => return None,
        Err(TryRecvError::Closed) => Err(FetchError::new("directory request was dropped")),
    };
    *directory = None;
    Some(result)
}
