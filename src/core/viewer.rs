use crate::core::renderer::Renderer;
use crate::geometry::camera::CameraState;
use crate::geometry::transform::{Axis, MatrixObserver, TransformState, matrix_display_text};
use crate::io::viewer_settings::ViewerSettings;
use crate::scene::wireframe_model::WireframeModel;
use image::RgbImage;
use log::debug;

/// 线框查看器核心：持有模型、变换状态、相机和渲染器
///
/// UI层只通过原始数值调用这里的方法；每次参数变化都会立即完整重绘。
/// 输入值由UI层（滑块范围、配置加载时的限幅）保证有效，此处不做校验。
pub struct Viewer {
    model: WireframeModel,
    transform: TransformState,
    camera: CameraState,
    renderer: Renderer,
    observer: Option<Box<dyn MatrixObserver>>,
}

impl Viewer {
    pub fn new(width: usize, height: usize) -> Self {
        let model = WireframeModel::letter_glyph();
        debug!(
            "线框模型: {} 个顶点, {} 条边",
            model.vertices().len(),
            model.edges().len()
        );

        let mut viewer = Self {
            model,
            transform: TransformState::default(),
            camera: CameraState::default(),
            renderer: Renderer::new(width.max(1), height.max(1)),
            observer: None,
        };
        viewer.render_frame();
        viewer
    }

    /// 按配置创建查看器：视口尺寸、相机和滑块初始值
    pub fn from_settings(settings: &ViewerSettings) -> Result<Self, String> {
        settings.validate()?;
        let rotation = settings.rotation_sliders()?;
        let position = settings.position_sliders()?;

        let mut viewer = Self::new(settings.width, settings.height);
        for axis in Axis::ALL {
            viewer.transform.set_rotation(axis, rotation[axis.index()]);
            viewer.transform.set_position(axis, position[axis.index()]);
        }
        viewer.transform.set_scale(settings.object_scale as f32);
        // 换上配置的相机并重绘
        viewer.set_camera(settings.camera());
        Ok(viewer)
    }

    /// 设置矩阵显示观察者
    pub fn set_matrix_observer(&mut self, observer: Box<dyn MatrixObserver>) {
        self.observer = Some(observer);
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn viewport_size(&self) -> (usize, usize) {
        (
            self.renderer.frame_buffer.width,
            self.renderer.frame_buffer.height,
        )
    }

    pub fn set_rotation(&mut self, axis: Axis, degrees: f32) {
        self.transform.set_rotation(axis, degrees);
        self.render_frame();
    }

    pub fn set_position(&mut self, axis: Axis, slider_value: f32) {
        self.transform.set_position(axis, slider_value);
        self.render_frame();
    }

    pub fn set_scale(&mut self, slider_value: f32) {
        self.transform.set_scale(slider_value);
        self.render_frame();
    }

    /// 滚轮增量（每格120单位）调整相机距离
    pub fn on_scroll(&mut self, delta: f32) {
        self.camera.on_scroll(delta);
        debug!("相机距离: {:.3}", self.camera.distance);
        self.render_frame();
    }

    /// 直接替换相机状态
    pub fn set_camera(&mut self, camera: CameraState) {
        self.camera = camera;
        self.render_frame();
    }

    /// 视口尺寸变化，重新计算投影
    pub fn on_resize(&mut self, width: usize, height: usize) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == self.viewport_size() {
            return;
        }
        self.renderer.resize(width, height);
        self.render_frame();
    }

    /// 使用当前状态完整重绘一帧；矩阵非单位时通知观察者
    pub fn render_frame(&mut self) {
        let matrix = self.transform.compose();

        if let (Some(observer), Some(text)) = (self.observer.as_mut(), matrix_display_text(&matrix))
        {
            observer.on_matrix_updated(&text);
        }

        self.renderer
            .render_frame(&self.model, &matrix, &self.camera);
    }

    /// 当前帧缓冲区的RGB字节
    pub fn color_bytes(&self) -> Vec<u8> {
        self.renderer.frame_buffer.get_color_buffer_bytes()
    }

    /// 以临时的俯仰/偏航角渲染并读回图像
    ///
    /// 读回之后恢复原相机角度并重绘，调用前后相机状态完全一致。
    /// 读回本身不会失败，所以恢复一定会执行。
    pub fn capture_orthographic(&mut self, pitch: f32, yaw: f32) -> RgbImage {
        let saved = self.camera;

        self.camera = saved.with_angles(pitch, yaw);
        self.render_frame();
        let image = self.renderer.frame_buffer.to_image();

        self.camera = saved;
        self.render_frame();

        image
    }
}
