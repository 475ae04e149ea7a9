// geometry/mod.rs
// 导出几何和变换相关模块
pub mod camera;
pub mod transform;
