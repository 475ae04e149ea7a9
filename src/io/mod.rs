// io/mod.rs
// 导出配置、命令行和图像输出相关模块
pub mod config_loader;
pub mod image_sink;
pub mod simple_cli;
pub mod viewer_settings;
