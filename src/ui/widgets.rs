use egui::{Color32, RichText};
use std::ops::RangeInclusive;

use super::app::WireframeApp;
use super::core::{CoreMethods, status_color};
use crate::geometry::transform::Axis;
use crate::io::viewer_settings::{POSITION_SLIDER_RANGE, ROTATION_SLIDER_RANGE, SCALE_SLIDER_RANGE};

/// 每个轴的标签颜色（X红、Y绿、Z蓝，与坐标轴一致）
const AXIS_COLORS: [Color32; 3] = [
    Color32::from_rgb(230, 60, 60),
    Color32::from_rgb(60, 200, 60),
    Color32::from_rgb(80, 120, 240),
];

/// UI组件相关方法的特质
pub trait WidgetMethods {
    /// 绘制底部控制面板：保存按钮与三组滑块
    fn draw_control_panel(&mut self, ui: &mut egui::Ui);

    /// 绘制右侧矩阵显示面板
    fn draw_matrix_panel(&mut self, ui: &mut egui::Ui);
}

impl WidgetMethods for WireframeApp {
    fn draw_control_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui
                .button(RichText::new("Save projections").size(15.0))
                .on_hover_text("Export front, side and top views as PNG")
                .clicked()
            {
                self.save_projections_to_disk();
            }

            if !self.status_message.is_empty() {
                ui.label(
                    RichText::new(&self.status_message).color(status_color(&self.status_message)),
                );
            }
        });

        ui.separator();

        ui.horizontal_top(|ui| {
            // 旋转（度）
            ui.vertical(|ui| {
                ui.label(RichText::new("Rotation").strong());
                for axis in Axis::ALL {
                    let value = &mut self.rotation_sliders[axis.index()];
                    if slider_row(ui, axis, value, ROTATION_SLIDER_RANGE) {
                        self.viewer.set_rotation(axis, *value as f32);
                        self.frame_dirty = true;
                    }
                }
            });

            ui.separator();

            // 平移（滑块值/50）
            ui.vertical(|ui| {
                ui.label(RichText::new("Position").strong());
                for axis in Axis::ALL {
                    let value = &mut self.position_sliders[axis.index()];
                    if slider_row(ui, axis, value, POSITION_SLIDER_RANGE) {
                        self.viewer.set_position(axis, *value as f32);
                        self.frame_dirty = true;
                    }
                }
            });

            ui.separator();

            ui.vertical(|ui| {
                ui.label(RichText::new("Scale").strong());
                let resp = ui.add(egui::Slider::new(&mut self.scale_slider, SCALE_SLIDER_RANGE));
                if resp.changed() {
                    self.viewer.set_scale(self.scale_slider as f32);
                    self.frame_dirty = true;
                }
                ui.label(format!("factor {:.2}", self.viewer.transform().scale));
                ui.add_space(4.0);
                ui.label(format!("Camera distance {:.2}", self.viewer.camera().distance))
                    .on_hover_text("Scroll over the viewport to move the camera");
            });
        });

        ui.add_space(6.0);
    }

    fn draw_matrix_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);

        let text = self.matrix_panel.text();
        let shown = if text.is_empty() {
            "Transform matrix:\n\n(identity)".to_string()
        } else {
            text
        };

        ui.label(
            RichText::new(shown)
                .monospace()
                .size(14.0)
                .color(Color32::from_rgb(80, 140, 255))
                .background_color(Color32::BLACK),
        );
    }
}

/// 一行带彩色轴标签的整数滑块，返回是否被拖动
fn slider_row(ui: &mut egui::Ui, axis: Axis, value: &mut i32, range: RangeInclusive<i32>) -> bool {
    ui.horizontal(|ui| {
        ui.label(RichText::new(axis.label()).color(AXIS_COLORS[axis.index()]).strong());
        ui.add(egui::Slider::new(value, range)).changed()
    })
    .inner
}
