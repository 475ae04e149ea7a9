use crate::core::viewer::Viewer;
use crate::io::image_sink::{ExportError, ImageSink};
use log::info;
use std::path::{Path, PathBuf};

/// 三个固定的导出视角
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionView {
    Front,
    Side,
    Top,
}

impl ProjectionView {
    pub const ALL: [ProjectionView; 3] = [
        ProjectionView::Front,
        ProjectionView::Side,
        ProjectionView::Top,
    ];

    /// (俯仰角, 偏航角)，单位为度
    pub fn angles(self) -> (f32, f32) {
        match self {
            ProjectionView::Front => (0.0, 0.0),
            ProjectionView::Side => (0.0, 90.0),
            ProjectionView::Top => (90.0, 0.0),
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ProjectionView::Front => "projection_front.png",
            ProjectionView::Side => "projection_side.png",
            ProjectionView::Top => "projection_top.png",
        }
    }
}

/// 依次捕获正视、侧视、俯视投影并写出
///
/// 每次捕获在写出之前就已经恢复相机，写出失败时直接返回错误，
/// 查看器状态不受影响。返回已写出的文件路径。
pub fn save_projections(
    viewer: &mut Viewer,
    sink: &mut dyn ImageSink,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    if !output_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let mut written = Vec::with_capacity(ProjectionView::ALL.len());
    for view in ProjectionView::ALL {
        let (pitch, yaw) = view.angles();
        let image = viewer.capture_orthographic(pitch, yaw);
        let path = output_dir.join(view.file_name());

        sink.write(image.as_raw(), image.width(), image.height(), &path)?;
        info!("投影已保存到 {}", path.display());
        written.push(path);
    }

    Ok(written)
}
