use crate::io::config_loader::TomlConfigLoader;
use crate::io::viewer_settings::ViewerSettings;
use clap::Parser;
use log::info;

/// 示例配置文件的写出位置
pub const EXAMPLE_CONFIG_PATH: &str = "temp_example_config.toml";

/// 🔥 **极简CLI** - 配置文件 + GUI/无头模式切换
#[derive(Parser, Debug)]
#[command(name = "wireframe-viewer")]
#[command(about = "🎨 三维线框变换演示：旋转/平移/缩放矩阵与正交投影导出")]
pub struct SimpleCli {
    /// 📁 配置文件路径（TOML格式）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// 🚀 无头模式（不启动GUI，直接导出三个投影）
    #[arg(long)]
    pub headless: bool,

    /// 📋 使用示例配置（临时创建并加载）
    #[arg(long)]
    pub use_example_config: bool,
}

impl SimpleCli {
    /// 🔥 **处理CLI参数并返回ViewerSettings和是否启动GUI**
    pub fn process() -> Result<(ViewerSettings, bool), String> {
        Self::parse().resolve()
    }

    fn resolve(&self) -> Result<(ViewerSettings, bool), String> {
        let should_start_gui = !self.headless;

        if self.use_example_config {
            TomlConfigLoader::create_example_config(EXAMPLE_CONFIG_PATH)
                .map_err(|e| format!("创建示例配置失败: {}", e))?;
            info!("✅ 已创建临时示例配置: {}", EXAMPLE_CONFIG_PATH);

            // 不删除临时文件，用户可以当模板
            let settings = TomlConfigLoader::load_from_file(EXAMPLE_CONFIG_PATH)
                .map_err(|e| format!("加载示例配置失败: {}", e))?;
            return Ok((settings, should_start_gui));
        }

        let settings = if let Some(config_path) = &self.config {
            info!("📁 加载配置文件: {}", config_path);
            TomlConfigLoader::load_from_file(config_path)
                .map_err(|e| format!("配置文件加载失败: {}", e))?
        } else {
            info!("💡 使用默认设置");
            ViewerSettings::default()
        };

        Ok((settings, should_start_gui))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_start_gui() {
        let cli = SimpleCli::parse_from(["wireframe-viewer"]);
        let (settings, gui) = cli.resolve().unwrap();
        assert!(gui);
        assert_eq!(settings, ViewerSettings::default());
    }

    #[test]
    fn test_headless_flag() {
        let cli = SimpleCli::parse_from(["wireframe-viewer", "--headless"]);
        assert!(cli.headless);
        let (_, gui) = cli.resolve().unwrap();
        assert!(!gui);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = SimpleCli::parse_from([
            "wireframe-viewer",
            "-c",
            "definitely/not/a/real/config.toml",
        ]);
        let err = cli.resolve().unwrap_err();
        assert!(err.contains("配置文件加载失败"));
    }
}
