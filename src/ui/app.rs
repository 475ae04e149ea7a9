use crate::core::viewer::Viewer;
use crate::geometry::transform::MatrixObserver;
use crate::io::viewer_settings::ViewerSettings;
use egui::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

// 导入其他UI模块
use super::core::CoreMethods;
use super::widgets::WidgetMethods;

/// 矩阵显示面板的共享文本，由查看器作为观察者写入
#[derive(Clone, Default)]
pub struct MatrixPanel {
    text: Rc<RefCell<String>>,
}

impl MatrixPanel {
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl MatrixObserver for MatrixPanel {
    fn on_matrix_updated(&mut self, text: &str) {
        let mut current = self.text.borrow_mut();
        if current.as_str() != text {
            current.clear();
            current.push_str(text);
        }
    }
}

/// GUI应用状态
pub struct WireframeApp {
    // ===== TOML可配置参数 =====
    pub settings: ViewerSettings,

    // ===== 核心状态 =====
    /// 查看器（变换管线 + 相机 + 渲染器）
    pub viewer: Viewer,
    /// 矩阵显示文本
    pub matrix_panel: MatrixPanel,

    // ===== 滑块值（界面整数值，原样传给查看器） =====
    pub rotation_sliders: [i32; 3],
    pub position_sliders: [i32; 3],
    pub scale_slider: i32,

    // ===== GUI界面状态 =====
    /// 渲染结果纹理句柄
    pub rendered_image: Option<egui::TextureHandle>,
    /// 帧缓冲区有新内容，需要重新上传纹理
    pub frame_dirty: bool,
    /// 状态消息显示
    pub status_message: String,
}

impl WireframeApp {
    /// 创建新的GUI应用实例
    pub fn new(settings: ViewerSettings, mut viewer: Viewer) -> Self {
        let matrix_panel = MatrixPanel::default();
        viewer.set_matrix_observer(Box::new(matrix_panel.clone()));
        // 观察者挂上后重绘一次，让初始矩阵（如果非单位）出现在面板上
        viewer.render_frame();

        let to_slider =
            |v: nalgebra::Vector3<f32>| -> [i32; 3] { v.map(|c| c.round() as i32).into() };
        let rotation_sliders = settings.rotation_sliders().map(to_slider).unwrap_or_default();
        let position_sliders = settings.position_sliders().map(to_slider).unwrap_or_default();
        let scale_slider = settings.object_scale;

        Self {
            settings,
            viewer,
            matrix_panel,
            rotation_sliders,
            position_sliders,
            scale_slider,
            rendered_image: None,
            frame_dirty: true,
            status_message: String::new(),
        }
    }
}

impl eframe::App for WireframeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 右侧：变换矩阵显示
        egui::SidePanel::right("matrix_panel")
            .min_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_matrix_panel(ui);
            });

        // 底部：保存按钮与滑块组
        egui::TopBottomPanel::bottom("control_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.draw_control_panel(ui);
            });

        // 中央：渲染视口
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            self.sync_viewport_size(available, ctx.pixels_per_point());
            self.display_render_result(ctx);

            let response = self.rendered_image.as_ref().map(|texture| {
                ui.add(
                    egui::Image::new(texture)
                        .fit_to_exact_size(Vec2::new(available.x, available.y))
                        .sense(egui::Sense::hover()),
                )
            });

            if let Some(response) = response {
                self.handle_viewport_input(&response, ctx);
            }
        });

        // 滚轮或滑块改变了画面时，下一帧重新上传纹理
        if self.frame_dirty {
            ctx.request_repaint();
        }
    }
}

/// 启动GUI应用
pub fn start_gui(settings: ViewerSettings) -> Result<(), String> {
    let viewer = Viewer::from_settings(&settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                settings.width as f32 + 340.0,
                settings.height as f32 + 300.0,
            ])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "3D Wireframe Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(WireframeApp::new(settings, viewer)))),
    )
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::Axis;

    #[test]
    fn test_matrix_panel_follows_viewer() {
        let mut app = WireframeApp::new(ViewerSettings::default(), Viewer::new(40, 30));
        assert!(app.matrix_panel.text().is_empty());

        app.viewer.set_position(Axis::X, 5.0);
        let text = app.matrix_panel.text();
        assert!(text.starts_with("Transform matrix:"));
        assert!(text.contains(" 0.100"));

        // 回到单位矩阵时面板保留上一次的内容
        app.viewer.set_position(Axis::X, 0.0);
        assert_eq!(app.matrix_panel.text(), text);
    }

    #[test]
    fn test_sliders_initialised_from_settings() {
        let settings = ViewerSettings {
            object_rotation: "10,20,30".to_string(),
            object_position: "-5,0,7".to_string(),
            object_scale: 42,
            ..Default::default()
        };
        let viewer = Viewer::from_settings(&settings).unwrap();
        let app = WireframeApp::new(settings, viewer);

        assert_eq!(app.rotation_sliders, [10, 20, 30]);
        assert_eq!(app.position_sliders, [-5, 0, 7]);
        assert_eq!(app.scale_slider, 42);
        assert!(!app.matrix_panel.text().is_empty());
    }
}
