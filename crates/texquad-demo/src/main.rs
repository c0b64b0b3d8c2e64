use anyhow::Result;

use texquad_engine::device::GraphicsInit;
use texquad_engine::logging::{LoggingConfig, init_logging};
use texquad_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("texquad starting");

    Runtime::run(RuntimeConfig::default(), GraphicsInit::default())
}
