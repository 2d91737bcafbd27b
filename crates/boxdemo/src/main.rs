use anyhow::Result;

use boxdemo::scene::BoxScene;
use boxdemo_engine::device::GpuInit;
use boxdemo_engine::gfx::WgpuDevice;
use boxdemo_engine::logging::{LoggingConfig, init_logging};
use boxdemo_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let gpu_init = GpuInit {
        // Vertex colors are authored as display values.
        prefer_srgb: false,
        ..GpuInit::default()
    };

    Runtime::run::<BoxScene<WgpuDevice>>(RuntimeConfig::default(), gpu_init)
}
