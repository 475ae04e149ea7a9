use crate::geometry::camera::CameraState;
use nalgebra::Vector3;
use std::ops::RangeInclusive;

/// 旋转滑块范围（度）
pub const ROTATION_SLIDER_RANGE: RangeInclusive<i32> = 0..=360;
/// 位置滑块范围（内部偏移 = 值 / 50）
pub const POSITION_SLIDER_RANGE: RangeInclusive<i32> = -100..=100;
/// 缩放滑块范围（有效缩放 = (值 + 49) / 50）
pub const SCALE_SLIDER_RANGE: RangeInclusive<i32> = 1..=200;

/// 🔥 **纯数据结构** - 所有可通过TOML配置的查看器参数
///
/// 物体变换保存为滑块值而不是内部值，与界面上的滑块一一对应。
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    // ===== 视口设置 =====
    /// 初始视口宽度（像素）
    pub width: usize,
    /// 初始视口高度（像素）
    pub height: usize,

    // ===== 相机参数 =====
    /// 相机沿Z轴的距离（负值表示在原点前方）
    pub camera_distance: f32,
    /// 俯仰角（度）
    pub camera_pitch: f32,
    /// 偏航角（度）
    pub camera_yaw: f32,

    // ===== 物体变换（滑块值） =====
    /// 旋转滑块 (x,y,z)，格式为"x,y,z"
    pub object_rotation: String,
    /// 位置滑块 (x,y,z)，格式为"x,y,z"
    pub object_position: String,
    /// 缩放滑块
    pub object_scale: i32,

    // ===== 输出设置 =====
    /// 投影图像的输出目录
    pub output_dir: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let camera = CameraState::default();
        Self {
            width: 900,
            height: 700,

            camera_distance: camera.distance,
            camera_pitch: camera.pitch,
            camera_yaw: camera.yaw,

            object_rotation: "0,0,0".to_string(),
            object_position: "0,0,0".to_string(),
            object_scale: *SCALE_SLIDER_RANGE.start(),

            output_dir: ".".to_string(),
        }
    }
}

/// 辅助函数用于解析逗号分隔的浮点数
pub fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("需要3个逗号分隔的值: '{}'", s));
    }
    let mut values = [0.0_f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("无效数字 '{}': {}", part, e))?;
    }
    Ok(Vector3::from(values))
}

/// 将向量各分量限制在滑块范围内，返回是否发生了限幅
pub fn clamp_vec3(v: &mut Vector3<f32>, range: &RangeInclusive<i32>) -> bool {
    let (lo, hi) = (*range.start() as f32, *range.end() as f32);
    let clamped = v.map(|c| c.clamp(lo, hi));
    let changed = clamped != *v;
    *v = clamped;
    changed
}

pub fn format_vec3(v: &Vector3<f32>) -> String {
    format!("{},{},{}", v.x, v.y, v.z)
}

impl ViewerSettings {
    pub fn camera(&self) -> CameraState {
        CameraState::new(self.camera_distance, self.camera_pitch, self.camera_yaw)
    }

    /// 解析旋转滑块值
    pub fn rotation_sliders(&self) -> Result<Vector3<f32>, String> {
        parse_vec3(&self.object_rotation).map_err(|e| format!("旋转参数无效: {}", e))
    }

    /// 解析位置滑块值
    pub fn position_sliders(&self) -> Result<Vector3<f32>, String> {
        parse_vec3(&self.object_position).map_err(|e| format!("位置参数无效: {}", e))
    }

    /// 验证参数
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err("错误: 视口宽度和高度必须大于0".to_string());
        }
        if !self.camera_distance.is_finite()
            || !self.camera_pitch.is_finite()
            || !self.camera_yaw.is_finite()
        {
            return Err("错误: 相机参数必须是有限数".to_string());
        }

        let in_range = |v: &Vector3<f32>, range: &RangeInclusive<i32>| {
            v.iter()
                .all(|c| (*range.start() as f32..=*range.end() as f32).contains(c))
        };
        if !in_range(&self.rotation_sliders()?, &ROTATION_SLIDER_RANGE) {
            return Err(format!("错误: 旋转滑块超出范围 {:?}", ROTATION_SLIDER_RANGE));
        }
        if !in_range(&self.position_sliders()?, &POSITION_SLIDER_RANGE) {
            return Err(format!("错误: 位置滑块超出范围 {:?}", POSITION_SLIDER_RANGE));
        }
        if !SCALE_SLIDER_RANGE.contains(&self.object_scale) {
            return Err(format!("错误: 缩放滑块超出范围 {:?}", SCALE_SLIDER_RANGE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ViewerSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.camera(), CameraState::default());
        assert_eq!(settings.object_scale, 1);
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3(" 1, -2.5 ,3").unwrap(), Vector3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn test_clamp_vec3() {
        let mut v = Vector3::new(-150.0, 20.0, 300.0);
        assert!(clamp_vec3(&mut v, &POSITION_SLIDER_RANGE));
        assert_eq!(v, Vector3::new(-100.0, 20.0, 100.0));
        assert!(!clamp_vec3(&mut v, &POSITION_SLIDER_RANGE));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let settings = ViewerSettings {
            object_scale: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ViewerSettings {
            object_rotation: "0,400,0".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ViewerSettings {
            height: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
