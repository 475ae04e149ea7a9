// utils/mod.rs
// 导出投影保存相关模块
pub mod save_utils;
