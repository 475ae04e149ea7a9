// scene/mod.rs
pub mod wireframe_model;
