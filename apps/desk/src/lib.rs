//! # Tally Desk
//!
//! Host application for the estimate editor.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Desk                                     │
//! │                                                                         │
//! │   stdin ──► console ──► EstimateEditor ──► HostLink                     │
//! │                                               │                         │
//! │                                               ▼ (unbounded mpsc)        │
//! │   stdout ◄── summary ◄── EstimateRecorder ◄── HostReceiver              │
//! │                           (receiver task)                               │
//! │                                                                         │
//! │   End of input: unmount editor ─► link deregistered ─► receiver drains │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//! - `cli` - Command line arguments
//! - `config` - Desk configuration (TOML + environment)
//! - `catalog` - Inventory file loading and the sample catalog
//! - `console` - Command console driving the editor
//! - `host` - Receiver task turning saves into numbered estimates
//! - `error` - Desk error type

pub mod catalog;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod host;

use tally_editor::{host_channel, EstimateEditor};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use cli::Cli;
pub use config::DeskConfig;
pub use error::{DeskError, DeskResult};

use crate::host::{receive_estimates, EstimateRecorder};

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so console output stays clean. Override the filter
/// with `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Runs the desk until end of input or `quit`.
///
/// ## Startup Sequence
/// 1. Initialize logging
/// 2. Load configuration and inventory
/// 3. Open the host channel and spawn the receiver
/// 4. Mount the editor
/// 5. Run the console
/// 6. Unmount and wait for the receiver to drain
pub async fn run(cli: Cli) -> DeskResult<()> {
    init_tracing();

    info!("Starting Tally Desk v{}", env!("CARGO_PKG_VERSION"));

    let config = DeskConfig::load(cli.config)?;

    let inventory = match &cli.inventory {
        Some(path) => catalog::load_inventory(path)?,
        None => {
            info!("No inventory file given, using the sample catalog");
            catalog::sample_catalog()
        }
    };

    let recorder = EstimateRecorder::new(&config, cli.customer)?;

    let (link, receiver) = host_channel();
    let receiver_task = tokio::spawn(receive_estimates(receiver, recorder));

    let mut editor = EstimateEditor::mount(config.editor_config(inventory), link);
    println!(
        "Tally Desk ready: {} items in inventory. Type 'help' for commands.",
        editor.inventory().len()
    );

    let console_result = console::run_console(&mut editor).await;

    editor.unmount();
    drop(editor);

    let recorder = receiver_task.await?;
    console_result?;

    println!("{} estimate(s) recorded", recorder.estimates().len());
    info!(recorded = recorder.estimates().len(), "Tally Desk stopped");
    Ok(())
}
