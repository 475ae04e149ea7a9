use nalgebra::{Matrix4, Point3, RowVector4, Vector3, Vector4};

/// 矩阵显示文本的标题行
pub const MATRIX_TEXT_HEADER: &str = "Transform matrix:\n\n";

/// 位置滑块值到内部偏移量的除数
pub const POSITION_SLIDER_DIVISOR: f32 = 50.0;

/// 缩放滑块偏移量：有效缩放 = (slider + 49) / 50
pub const SCALE_SLIDER_OFFSET: f32 = 49.0;
pub const SCALE_SLIDER_DIVISOR: f32 = 50.0;

/// 坐标轴选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// 物体变换状态：旋转（度）、位置偏移、均匀缩放
///
/// 所有字段由UI层预先限制在滑块范围内，本结构不做校验。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// 绕X/Y/Z轴的旋转角（度）
    pub rotation: Vector3<f32>,
    /// 父坐标系中的位置偏移
    pub position: Vector3<f32>,
    /// 均匀缩放因子
    pub scale: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation: Vector3::zeros(),
            position: Vector3::zeros(),
            scale: 1.0,
        }
    }
}

impl TransformState {
    pub fn set_rotation(&mut self, axis: Axis, degrees: f32) {
        self.rotation[axis.index()] = degrees;
    }

    /// 按滑块值设置位置，内部偏移 = 滑块值 / 50
    pub fn set_position(&mut self, axis: Axis, slider_value: f32) {
        self.position[axis.index()] = position_from_slider(slider_value);
    }

    /// 按滑块值设置缩放，有效缩放 = (滑块值 + 49) / 50
    pub fn set_scale(&mut self, slider_value: f32) {
        self.scale = scale_from_slider(slider_value);
    }

    /// 合成当前状态对应的4x4变换矩阵
    pub fn compose(&self) -> Matrix4<f32> {
        TransformPipeline::build_transform(self.scale, &self.rotation, &self.position)
    }
}

pub fn position_from_slider(slider_value: f32) -> f32 {
    slider_value / POSITION_SLIDER_DIVISOR
}

pub fn scale_from_slider(slider_value: f32) -> f32 {
    (slider_value + SCALE_SLIDER_OFFSET) / SCALE_SLIDER_DIVISOR
}

/// 接收合成矩阵文本的观察者（例如矩阵显示面板）
pub trait MatrixObserver {
    fn on_matrix_updated(&mut self, text: &str);
}

/// 变换管线：缩放 -> 旋转 -> 平移，采用行向量约定（v' = v · M）
///
/// 矩阵按行向量约定存储，平移位于第4行，与显示给用户的矩阵逐元素一致。
pub struct TransformPipeline;

impl TransformPipeline {
    /// 均匀缩放矩阵，前三个对角元素为 `scale`
    pub fn build_scale_matrix(scale: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(scale, scale, scale))
    }

    /// 绕X轴旋转（右手系，行向量约定）
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// 绕Y轴旋转（右手系，行向量约定）
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// 绕Z轴旋转（右手系，行向量约定）
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let (s, c) = angle_rad.sin_cos();
        Matrix4::new(
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// 由三个欧拉角（度）构造旋转矩阵，固定合成顺序 Rz · Ry · Rx
    pub fn build_rotation_matrix(rx: f32, ry: f32, rz: f32) -> Matrix4<f32> {
        Self::rotation_z(rz.to_radians())
            * Self::rotation_y(ry.to_radians())
            * Self::rotation_x(rx.to_radians())
    }

    /// 合成 Scale · Rotation，然后用位置向量覆盖平移行
    ///
    /// 平移是覆盖而非再乘一个平移矩阵，因此始终作用在父坐标系中，
    /// 不受旋转和缩放影响。
    pub fn build_transform(
        scale: f32,
        rotation: &Vector3<f32>,
        position: &Vector3<f32>,
    ) -> Matrix4<f32> {
        let mut matrix = Self::build_scale_matrix(scale)
            * Self::build_rotation_matrix(rotation.x, rotation.y, rotation.z);
        matrix[(3, 0)] = position.x;
        matrix[(3, 1)] = position.y;
        matrix[(3, 2)] = position.z;
        matrix
    }

    /// 顶点提升为齐次坐标 (w=1)，左乘矩阵后丢弃w
    pub fn apply_transform(vertex: &Point3<f32>, matrix: &Matrix4<f32>) -> Point3<f32> {
        let homogeneous = RowVector4::new(vertex.x, vertex.y, vertex.z, 1.0) * matrix;
        Point3::new(homogeneous[0], homogeneous[1], homogeneous[2])
    }
}

/// 格式化单个矩阵元素：3位小数，非负数前留一个空格
fn format_element(value: f32) -> String {
    // 符号位决定前缀，-0.0 显示为 -0.000
    if value.is_sign_negative() {
        format!("{:.3}", value)
    } else {
        format!(" {:.3}", value)
    }
}

/// 生成矩阵显示文本；单位矩阵返回 `None`
pub fn matrix_display_text(matrix: &Matrix4<f32>) -> Option<String> {
    if *matrix == Matrix4::identity() {
        return None;
    }

    let mut text = String::from(MATRIX_TEXT_HEADER);
    for row in matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|&v| format_element(v)).collect();
        text.push_str(&cells.join("\t"));
        text.push('\n');
    }
    Some(text)
}

// 以下是统一的坐标变换函数（列向量约定，用于相机与投影）

/// 将世界坐标点转换为裁剪空间坐标（齐次坐标）
pub fn world_to_clip(point: &Point3<f32>, view_projection_matrix: &Matrix4<f32>) -> Vector4<f32> {
    view_projection_matrix * point.to_homogeneous()
}

/// 将裁剪空间坐标转换为NDC坐标（透视除法）
pub fn clip_to_ndc(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-8 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// 将NDC坐标转换为屏幕像素坐标，z映射到[0,1]深度
pub fn ndc_to_pixel(ndc: &Point3<f32>, width: f32, height: f32) -> Point3<f32> {
    let screen_x = (ndc.x + 1.0) * 0.5 * width;
    // 翻转Y轴：NDC中+1是顶部，屏幕坐标中0是顶部
    let screen_y = (1.0 - (ndc.y + 1.0) * 0.5) * height;
    let depth = (ndc.z + 1.0) * 0.5;
    Point3::new(screen_x, screen_y, depth)
}
