mod catalog;
mod cli;
mod error;
mod files;
mod loader;
mod ui;

use anyhow::Context;
use clap::Parser;
use winit::event_loop::EventLoop;

use crate::catalog::{ImageCatalog, ScanNotifier};
use crate::cli::Cli;
use crate::loader::UserEvent;
use crate::ui::state::ViewState;
use crate::ui::{App, WINDOW_SIZE};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let event_loop = EventLoop::<UserEvent>::with_user_event()
        .build()
        .context("create event loop")?;
    let proxy = event_loop.create_proxy();

    // Rescans only post an event; the redraw happens back on the loop thread.
    let notifier: ScanNotifier = Box::new(move |count| {
        let _ = proxy.send_event(UserEvent::CatalogScanned(count));
    });

    let raw_path = cli.path.unwrap_or_default();
    let catalog = ImageCatalog::with_notifier(&raw_path, Some(notifier));
    log::info!("browsing {}", catalog.directory().display());

    let state = ViewState::new(catalog, WINDOW_SIZE);
    let mut app = App::new(state);

    event_loop.run_app(&mut app).context("run event loop")?;
    Ok(())
}
