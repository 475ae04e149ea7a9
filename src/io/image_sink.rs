use image::{ColorType, ImageFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 导出投影图像时的错误
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to prepare output directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// 图像写出能力：接收RGB8像素并写到指定路径
pub trait ImageSink {
    fn write(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        path: &Path,
    ) -> Result<(), ExportError>;
}

/// 写出无损PNG文件
#[derive(Debug, Default, Clone, Copy)]
pub struct PngFileSink;

impl ImageSink for PngFileSink {
    fn write(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        path: &Path,
    ) -> Result<(), ExportError> {
        image::save_buffer_with_format(
            path,
            pixels,
            width,
            height,
            ColorType::Rgb8,
            ImageFormat::Png,
        )
        .map_err(|source| ExportError::Image {
            path: path.to_path_buf(),
            source,
        })
    }
}
