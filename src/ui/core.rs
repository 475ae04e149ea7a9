use crate::geometry::camera::WHEEL_DELTA_PER_NOTCH;
use crate::io::image_sink::PngFileSink;
use crate::ui::app::WireframeApp;
use crate::utils::save_utils::save_projections;
use egui::{Color32, Context, Event, MouseWheelUnit, Vec2};
use log::{error, info};
use std::path::Path;

/// 核心业务逻辑方法
///
/// 该trait包含应用的核心功能：
/// - 视口尺寸同步与滚轮交互
/// - 渲染结果上传
/// - 投影导出与错误处理
pub trait CoreMethods {
    /// 视口尺寸变化时通知查看器重新计算投影
    fn sync_viewport_size(&mut self, available: Vec2, pixels_per_point: f32);

    /// 处理视口上的滚轮推拉
    fn handle_viewport_input(&mut self, response: &egui::Response, ctx: &Context);

    /// 在UI中显示渲染结果
    fn display_render_result(&mut self, ctx: &Context);

    /// 导出正视、侧视、俯视三张投影
    fn save_projections_to_disk(&mut self);

    /// 设置错误信息
    fn set_error(&mut self, message: String);
}

impl CoreMethods for WireframeApp {
    fn sync_viewport_size(&mut self, available: Vec2, pixels_per_point: f32) {
        let width = (available.x * pixels_per_point).round().max(1.0) as usize;
        let height = (available.y * pixels_per_point).round().max(1.0) as usize;

        if (width, height) != self.viewer.viewport_size() {
            self.viewer.on_resize(width, height);
            self.frame_dirty = true;
        }
    }

    fn handle_viewport_input(&mut self, response: &egui::Response, ctx: &Context) {
        if !response.hovered() {
            return;
        }

        let line_scroll_speed = ctx.options(|o| o.line_scroll_speed);
        let delta = ctx.input(|i| wheel_delta(&i.events, line_scroll_speed));
        if delta != 0.0 {
            self.viewer.on_scroll(delta);
            self.frame_dirty = true;
        }
    }

    fn display_render_result(&mut self, ctx: &Context) {
        if !self.frame_dirty && self.rendered_image.is_some() {
            return;
        }

        let (width, height) = self.viewer.viewport_size();
        let image = egui::ColorImage::from_rgb([width, height], &self.viewer.color_bytes());

        match &mut self.rendered_image {
            Some(texture) => texture.set(image, egui::TextureOptions::default()),
            None => {
                self.rendered_image = Some(ctx.load_texture(
                    "wireframe_viewport",
                    image,
                    egui::TextureOptions::default(),
                ));
            }
        }

        self.frame_dirty = false;
    }

    fn save_projections_to_disk(&mut self) {
        let output_dir = self.settings.output_dir.clone();

        match save_projections(&mut self.viewer, &mut PngFileSink, Path::new(&output_dir)) {
            Ok(written) => {
                info!("已保存 {} 个投影到 {}", written.len(), output_dir);
                let names: Vec<String> = written
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect();
                self.status_message = format!("Saved {} to {}", names.join(", "), output_dir);
            }
            Err(e) => self.set_error(format!("Failed to save projections: {}", e)),
        }

        // 导出过程中帧缓冲区被重绘过
        self.frame_dirty = true;
    }

    fn set_error(&mut self, message: String) {
        error!("{}", message);
        self.status_message = message;
    }
}

/// 把本帧的滚轮事件换算成每格120单位的增量
///
/// 按行滚动的事件一行即一格；触控板等按点滚动的事件
/// 用 egui 的 `line_scroll_speed` 折算回格数。按页滚动视为一格。
pub fn wheel_delta(events: &[Event], line_scroll_speed: f32) -> f32 {
    events
        .iter()
        .map(|event| match event {
            Event::MouseWheel { unit, delta, .. } => match unit {
                MouseWheelUnit::Line | MouseWheelUnit::Page => delta.y * WHEEL_DELTA_PER_NOTCH,
                MouseWheelUnit::Point if line_scroll_speed > 0.0 => {
                    delta.y / line_scroll_speed * WHEEL_DELTA_PER_NOTCH
                }
                MouseWheelUnit::Point => 0.0,
            },
            _ => 0.0,
        })
        .sum()
}

/// 状态消息的显示颜色
pub fn status_color(message: &str) -> Color32 {
    if message.starts_with("Failed") {
        Color32::from_rgb(230, 50, 50)
    } else {
        Color32::from_rgb(100, 200, 100)
    }
}
