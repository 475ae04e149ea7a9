use crate::core::frame_buffer::FrameBuffer;
use crate::core::line_rasterizer::{LineStyle, draw_line};
use crate::geometry::camera::{CameraState, Projection};
use crate::geometry::transform::{TransformPipeline, world_to_clip};
use crate::scene::wireframe_model::WireframeModel;
use log::debug;
use nalgebra::{Matrix4, Point3};

/// 背景色（0.2灰）
pub const BACKGROUND_COLOR: [u8; 3] = [51, 51, 51];

/// 参考坐标轴长度
pub const AXIS_LENGTH: f32 = 3.0;

const AXIS_STYLE_WIDTH: u32 = 2;
const FIGURE_STYLE: LineStyle = LineStyle {
    color: [255, 255, 255],
    width: 1,
};

/// 三条参考坐标轴：红=X，绿=Y，蓝=Z
const AXES: [([f32; 3], [u8; 3]); 3] = [
    ([AXIS_LENGTH, 0.0, 0.0], [255, 0, 0]),
    ([0.0, AXIS_LENGTH, 0.0], [0, 255, 0]),
    ([0.0, 0.0, AXIS_LENGTH], [0, 0, 255]),
];

/// 线框渲染器，持有帧缓冲区和投影参数
pub struct Renderer {
    pub frame_buffer: FrameBuffer,
    projection: Projection,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame_buffer: FrameBuffer::new(width, height),
            projection: Projection::new(width, height),
        }
    }

    /// 重建帧缓冲区并重新计算投影矩阵
    pub fn resize(&mut self, width: usize, height: usize) {
        self.frame_buffer = FrameBuffer::new(width, height);
        self.projection.resize(width, height);
        debug!(
            "视口尺寸变化: {}x{}，宽高比 {:.3}",
            width,
            height,
            self.projection.aspect_ratio()
        );
    }

    /// 渲染一帧：清屏 -> 坐标轴（仅相机） -> 经变换的线框（相机 + 变换管线）
    pub fn render_frame(
        &mut self,
        model: &WireframeModel,
        transform: &Matrix4<f32>,
        camera: &CameraState,
    ) {
        let view_projection = self.projection.matrix() * camera.view_matrix();

        self.frame_buffer.clear(BACKGROUND_COLOR);
        self.draw_axes(&view_projection);
        self.draw_figure(model, transform, &view_projection);
    }

    fn draw_axes(&mut self, view_projection: &Matrix4<f32>) {
        let origin = world_to_clip(&Point3::origin(), view_projection);
        for (tip, color) in AXES {
            let end = world_to_clip(&Point3::from(tip), view_projection);
            draw_line(
                &mut self.frame_buffer,
                &origin,
                &end,
                LineStyle {
                    color,
                    width: AXIS_STYLE_WIDTH,
                },
            );
        }
    }

    fn draw_figure(
        &mut self,
        model: &WireframeModel,
        transform: &Matrix4<f32>,
        view_projection: &Matrix4<f32>,
    ) {
        for (a, b) in model.edge_endpoints() {
            let start = TransformPipeline::apply_transform(a, transform);
            let end = TransformPipeline::apply_transform(b, transform);
            draw_line(
                &mut self.frame_buffer,
                &world_to_clip(&start, view_projection),
                &world_to_clip(&end, view_projection),
                FIGURE_STYLE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_color(fb: &FrameBuffer, color: [u8; 3]) -> usize {
        fb.get_color_buffer_bytes()
            .chunks_exact(3)
            .filter(|px| px[..] == color[..])
            .count()
    }

    #[test]
    fn test_render_draws_axes_and_figure() {
        let mut renderer = Renderer::new(200, 150);
        let model = WireframeModel::letter_glyph();
        renderer.render_frame(&model, &Matrix4::identity(), &CameraState::default());

        let fb = &renderer.frame_buffer;
        assert!(count_color(fb, [255, 0, 0]) > 0);
        assert!(count_color(fb, [0, 255, 0]) > 0);
        assert!(count_color(fb, [0, 0, 255]) > 0);
        assert!(count_color(fb, [255, 255, 255]) > 0);
        assert!(count_color(fb, BACKGROUND_COLOR) > 200 * 150 / 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut renderer = Renderer::new(120, 90);
        let model = WireframeModel::letter_glyph();
        let transform = TransformPipeline::build_transform(
            1.5,
            &nalgebra::Vector3::new(10.0, 20.0, 30.0),
            &nalgebra::Vector3::new(0.2, -0.4, 0.0),
        );
        let camera = CameraState::default();

        renderer.render_frame(&model, &transform, &camera);
        let first = renderer.frame_buffer.get_color_buffer_bytes();
        renderer.render_frame(&model, &transform, &camera);
        assert_eq!(first, renderer.frame_buffer.get_color_buffer_bytes());
    }

    #[test]
    fn test_camera_behind_everything_leaves_background() {
        let mut renderer = Renderer::new(64, 64);
        let model = WireframeModel::letter_glyph();
        // 相机推到物体后方，所有几何都在近平面之后
        let camera = CameraState::new(20.0, 0.0, 0.0);
        renderer.render_frame(&model, &Matrix4::identity(), &camera);
        assert_eq!(count_color(&renderer.frame_buffer, BACKGROUND_COLOR), 64 * 64);
    }

    #[test]
    fn test_resize_rebuilds_buffer() {
        let mut renderer = Renderer::new(64, 64);
        renderer.resize(32, 16);
        assert_eq!(renderer.frame_buffer.width, 32);
        assert_eq!(renderer.frame_buffer.height, 16);
        assert_eq!(renderer.frame_buffer.get_color_buffer_bytes().len(), 32 * 16 * 3);
        assert!((renderer.projection.aspect_ratio() - 2.0).abs() < 1e-6);
    }
}
