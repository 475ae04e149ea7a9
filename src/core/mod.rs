// core/mod.rs
// 导出帧缓冲、线段光栅化和渲染相关模块
pub mod frame_buffer;
pub mod line_rasterizer;
pub mod renderer;
pub mod viewer;
