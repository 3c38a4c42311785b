mod fighter_scene;
mod rect_scene;

use anyhow::{bail, Result};
use kestrel_engine::device::GpuInit;
use kestrel_engine::logging::{init_logging, LoggingConfig};
use kestrel_engine::window::{Runtime, RuntimeConfig};

use fighter_scene::FighterScene;
use rect_scene::RectScene;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let scene = std::env::args().nth(1).unwrap_or_else(|| "rect".to_string());
    log::info!("starting scene '{scene}'");

    match scene.as_str() {
        "rect" => Runtime::run(
            RuntimeConfig {
                title: "kestrel: bouncing rectangle".to_string(),
                ..RuntimeConfig::default()
            },
            GpuInit::default(),
            RectScene::default(),
        ),
        "fighter" => Runtime::run(
            RuntimeConfig {
                title: "kestrel: fighter".to_string(),
                ..RuntimeConfig::default()
            },
            GpuInit::default(),
            FighterScene::default(),
        ),
        other => bail!("unknown scene '{other}' (expected 'rect' or 'fighter')"),
    }
}
