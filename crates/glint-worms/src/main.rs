mod worms;

use anyhow::Result;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::window::{Runtime, WindowConfig};

use worms::WormsGame;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(WindowConfig::default(), WormsGame::default())
}
