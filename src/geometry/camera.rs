use nalgebra::{Matrix4, Vector3};

/// 滚轮每一格对应的增量单位
pub const WHEEL_DELTA_PER_NOTCH: f32 = 120.0;

pub const DEFAULT_FOV_Y_DEGREES: f32 = 45.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;

/// 相机状态：沿-Z放置的观察点，世界绕其旋转
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// 沿Z轴的平移量（通常为负）
    pub distance: f32,
    /// 绕X轴的俯仰角（度）
    pub pitch: f32,
    /// 绕Y轴的偏航角（度）
    pub yaw: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            distance: -10.0,
            pitch: 30.0,
            yaw: -45.0,
        }
    }
}

impl CameraState {
    pub fn new(distance: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            distance,
            pitch,
            yaw,
        }
    }

    /// 返回替换了俯仰角和偏航角的副本，距离不变
    pub fn with_angles(self, pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw, ..self }
    }

    /// 滚轮推拉：每 120 个增量单位移动一个单位距离
    pub fn on_scroll(&mut self, delta: f32) {
        self.distance += delta / WHEEL_DELTA_PER_NOTCH;
    }

    /// 视图矩阵，见 [`setup_view`]
    pub fn view_matrix(&self) -> Matrix4<f32> {
        setup_view(self)
    }
}

/// 构造视图矩阵：单位矩阵 -> 平移 (0,0,distance) -> 绕X旋转pitch -> 绕Y旋转yaw
///
/// 列向量约定下为 `T · Rx · Ry`，即先绕Y、再绕X旋转世界，最后推到相机前方。
pub fn setup_view(camera: &CameraState) -> Matrix4<f32> {
    Matrix4::new_translation(&Vector3::new(0.0, 0.0, camera.distance))
        * Matrix4::from_axis_angle(&Vector3::x_axis(), camera.pitch.to_radians())
        * Matrix4::from_axis_angle(&Vector3::y_axis(), camera.yaw.to_radians())
}

/// 透视投影矩阵，aspect = width / height
pub fn setup_projection(
    width: f32,
    height: f32,
    fov_y_degrees: f32,
    near: f32,
    far: f32,
) -> Matrix4<f32> {
    Matrix4::new_perspective(width / height, fov_y_degrees.to_radians(), near, far)
}

/// 视口投影参数，每次窗口尺寸变化时重新计算
#[derive(Debug, Clone)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    matrix: Matrix4<f32>,
}

impl Projection {
    pub fn new(width: usize, height: usize) -> Self {
        let mut projection = Self {
            width,
            height,
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            matrix: Matrix4::identity(),
        };
        projection.update_matrix();
        projection
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.update_matrix();
    }

    fn update_matrix(&mut self) {
        self.matrix = setup_projection(
            self.width as f32,
            self.height as f32,
            self.fov_y_degrees,
            self.near,
            self.far,
        );
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
