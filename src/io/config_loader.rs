use crate::io::viewer_settings::{
    POSITION_SLIDER_RANGE, ROTATION_SLIDER_RANGE, SCALE_SLIDER_RANGE, ViewerSettings, clamp_vec3,
    format_vec3, parse_vec3,
};
use log::warn;
use std::path::Path;
use toml::Value;

/// TOML配置管理器 - 统一处理所有配置的读写
pub struct TomlConfigLoader;

impl TomlConfigLoader {
    /// 从TOML文件加载完整配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ViewerSettings, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("读取配置文件失败: {}", e))?;

        Self::load_from_content(&content)
    }

    /// 从TOML内容字符串加载配置
    pub fn load_from_content(content: &str) -> Result<ViewerSettings, String> {
        let toml_value: Value =
            toml::from_str(content).map_err(|e| format!("解析TOML失败: {}", e))?;

        Self::parse_toml_to_settings(toml_value)
    }

    /// 保存配置到TOML文件
    pub fn save_to_file<P: AsRef<Path>>(settings: &ViewerSettings, path: P) -> Result<(), String> {
        let toml_content = Self::settings_to_toml(settings);
        std::fs::write(path, toml_content).map_err(|e| format!("写入配置文件失败: {}", e))
    }

    /// 直接生成示例配置文件
    pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<(), String> {
        let settings = ViewerSettings {
            object_rotation: "20,35,0".to_string(),
            object_scale: 26,
            ..Default::default()
        };

        Self::save_to_file(&settings, path).map_err(|e| format!("创建示例配置失败: {}", e))
    }

    // ===== TOML -> ViewerSettings 转换 =====

    fn parse_toml_to_settings(toml: Value) -> Result<ViewerSettings, String> {
        let mut settings = ViewerSettings::default();

        // [window] 部分
        if let Some(window) = toml.get("window").and_then(|v| v.as_table()) {
            Self::parse_window_section(&mut settings, window)?;
        }

        // [camera] 部分
        if let Some(camera) = toml.get("camera").and_then(|v| v.as_table()) {
            Self::parse_camera_section(&mut settings, camera)?;
        }

        // [object] 部分
        if let Some(object) = toml.get("object").and_then(|v| v.as_table()) {
            Self::parse_object_section(&mut settings, object)?;
        }

        // [output] 部分
        if let Some(output) = toml.get("output").and_then(|v| v.as_table()) {
            Self::parse_output_section(&mut settings, output)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    // ===== 各个section的解析方法 =====

    fn parse_window_section(
        settings: &mut ViewerSettings,
        window: &toml::Table,
    ) -> Result<(), String> {
        if let Some(width) = window.get("width").and_then(|v| v.as_integer()) {
            settings.width = width.clamp(1, 8192) as usize;
        }
        if let Some(height) = window.get("height").and_then(|v| v.as_integer()) {
            settings.height = height.clamp(1, 8192) as usize;
        }
        Ok(())
    }

    fn parse_camera_section(
        settings: &mut ViewerSettings,
        camera: &toml::Table,
    ) -> Result<(), String> {
        if let Some(distance) = Self::get_number(camera, "distance") {
            settings.camera_distance = distance as f32;
        }
        if let Some(pitch) = Self::get_number(camera, "pitch") {
            settings.camera_pitch = pitch as f32;
        }
        if let Some(yaw) = Self::get_number(camera, "yaw") {
            settings.camera_yaw = yaw as f32;
        }
        Ok(())
    }

    fn parse_object_section(
        settings: &mut ViewerSettings,
        object: &toml::Table,
    ) -> Result<(), String> {
        if let Some(rotation) = object.get("rotation").and_then(|v| v.as_str()) {
            let mut v = parse_vec3(rotation).map_err(|e| format!("[object] rotation: {}", e))?;
            if clamp_vec3(&mut v, &ROTATION_SLIDER_RANGE) {
                warn!("旋转滑块值 '{}' 超出范围，已限制为 {}", rotation, format_vec3(&v));
            }
            settings.object_rotation = format_vec3(&v);
        }
        if let Some(position) = object.get("position").and_then(|v| v.as_str()) {
            let mut v = parse_vec3(position).map_err(|e| format!("[object] position: {}", e))?;
            if clamp_vec3(&mut v, &POSITION_SLIDER_RANGE) {
                warn!("位置滑块值 '{}' 超出范围，已限制为 {}", position, format_vec3(&v));
            }
            settings.object_position = format_vec3(&v);
        }
        if let Some(scale) = object.get("scale").and_then(|v| v.as_integer()) {
            let clamped = scale.clamp(
                *SCALE_SLIDER_RANGE.start() as i64,
                *SCALE_SLIDER_RANGE.end() as i64,
            );
            if clamped != scale {
                warn!("缩放滑块值 {} 超出范围，已限制为 {}", scale, clamped);
            }
            settings.object_scale = clamped as i32;
        }
        Ok(())
    }

    fn parse_output_section(
        settings: &mut ViewerSettings,
        output: &toml::Table,
    ) -> Result<(), String> {
        if let Some(output_dir) = output.get("output_dir").and_then(|v| v.as_str()) {
            settings.output_dir = output_dir.to_string();
        }
        Ok(())
    }

    /// 整数和浮点数都接受
    fn get_number(table: &toml::Table, key: &str) -> Option<f64> {
        table
            .get(key)
            .and_then(|v| v.as_float().or_else(|| v.as_integer().map(|i| i as f64)))
    }

    // ===== ViewerSettings -> TOML 转换 =====

    fn settings_to_toml(settings: &ViewerSettings) -> String {
        let mut content = String::new();

        // 文件头注释
        content.push_str("# 🔥 线框查看器配置文件\n");
        content.push_str("# 物体变换使用滑块值：旋转 0..360，位置 -100..100，缩放 1..200\n\n");

        // [window] 部分
        content.push_str("[window]\n");
        content.push_str(&format!("width = {}\n", settings.width));
        content.push_str(&format!("height = {}\n", settings.height));
        content.push('\n');

        // [camera] 部分
        content.push_str("[camera]\n");
        content.push_str(&format!("distance = {:?}\n", settings.camera_distance));
        content.push_str(&format!("pitch = {:?}\n", settings.camera_pitch));
        content.push_str(&format!("yaw = {:?}\n", settings.camera_yaw));
        content.push('\n');

        // [object] 部分
        content.push_str("[object]\n");
        content.push_str(&format!("rotation = \"{}\"\n", settings.object_rotation));
        content.push_str(&format!("position = \"{}\"\n", settings.object_position));
        content.push_str(&format!("scale = {}\n", settings.object_scale));
        content.push('\n');

        // [output] 部分
        content.push_str("[output]\n");
        // 路径里可能有引号或反斜杠，交给toml按字符串规则转义
        content.push_str(&format!(
            "output_dir = {}\n",
            Value::String(settings.output_dir.clone())
        ));

        content
    }
}
