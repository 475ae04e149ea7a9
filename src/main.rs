use log::info;
use std::path::Path;
use std::time::Instant;

mod core;
mod geometry;
mod io;
mod scene;
mod ui;
mod utils;

use crate::core::viewer::Viewer;
use crate::io::image_sink::PngFileSink;
use crate::io::simple_cli::SimpleCli;
use crate::io::viewer_settings::ViewerSettings;
use crate::utils::save_utils::save_projections;

/// 无头模式：按配置渲染并直接导出三个投影
fn run_headless(settings: &ViewerSettings) -> Result<(), String> {
    let start_time = Instant::now();

    let mut viewer = Viewer::from_settings(settings)?;
    let written = save_projections(&mut viewer, &mut PngFileSink, Path::new(&settings.output_dir))
        .map_err(|e| format!("导出投影失败: {}", e))?;

    info!(
        "已导出 {} 个投影，耗时 {:?}",
        written.len(),
        start_time.elapsed()
    );
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (settings, should_start_gui) = SimpleCli::process()?;

    if should_start_gui {
        ui::start_gui(settings).map_err(|e| format!("GUI启动失败: {}", e))
    } else {
        run_headless(&settings)
    }
}
