use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use enroll_core::wizard::{SimulatedGateway, Wizard, WizardConfig};
use enroll_core::wizard::store::ProgressStore;
use enroll_store::{FileProgressStore, MemoryProgressStore};
use enroll_ui::app::App;
use enroll_ui::logging;

/// Health coverage enrollment for independent workers.
#[derive(Debug, Parser)]
#[command(name = "enroll", version)]
struct Cli {
    /// Directory holding saved progress between sessions.
    #[arg(long, default_value = ".enroll")]
    data_dir: PathBuf,

    /// Start a fresh application; nothing is persisted to disk.
    #[arg(long)]
    fresh: bool,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let store: Arc<dyn ProgressStore> = if cli.fresh {
        Arc::new(MemoryProgressStore::default())
    } else {
        Arc::new(FileProgressStore::new(&cli.data_dir))
    };
    let gateway = Arc::new(SimulatedGateway::default());

    let wizard = Wizard::new(store, gateway, WizardConfig::default());

    println!("GigHealth Enroll");
    println!("Answer each prompt; press Enter to keep a shown value,");
    println!("type `back` at any field to return to the previous step.");

    App::new(wizard).run().await
}
