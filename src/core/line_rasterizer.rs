use crate::core::frame_buffer::FrameBuffer;
use crate::geometry::transform::{clip_to_ndc, ndc_to_pixel};
use nalgebra::{Point3, Vector4};

/// 线段光栅化所需的绘制参数
#[derive(Debug, Clone, Copy)]
pub struct LineStyle {
    pub color: [u8; 3],
    /// 线宽（像素），至少为1
    pub width: u32,
}

/// 齐次裁剪空间中的六个裁剪平面：d(p) >= 0 为可见侧
fn clip_plane_distances(p: &Vector4<f32>) -> [f32; 6] {
    [
        p.w + p.x,
        p.w - p.x,
        p.w + p.y,
        p.w - p.y,
        p.w + p.z,
        p.w - p.z,
    ]
}

/// Liang-Barsky 齐次裁剪，返回裁剪后的两个端点；完全不可见时返回 `None`
pub fn clip_line(p0: &Vector4<f32>, p1: &Vector4<f32>) -> Option<(Vector4<f32>, Vector4<f32>)> {
    let d0 = clip_plane_distances(p0);
    let d1 = clip_plane_distances(p1);

    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    for (a, b) in d0.into_iter().zip(d1) {
        if a < 0.0 && b < 0.0 {
            return None;
        }
        if a < 0.0 {
            t_enter = t_enter.max(a / (a - b));
        } else if b < 0.0 {
            t_exit = t_exit.min(a / (a - b));
        }
        if t_enter > t_exit {
            return None;
        }
    }

    let start = if t_enter > 0.0 {
        p0.lerp(p1, t_enter)
    } else {
        *p0
    };
    let end = if t_exit < 1.0 { p0.lerp(p1, t_exit) } else { *p1 };
    Some((start, end))
}

/// 绘制一条裁剪空间中的线段
///
/// 沿主轴逐像素步进，深度在屏幕空间线性插值（NDC深度在屏幕空间是仿射的）。
/// 宽线按GL非抗锯齿规则沿次轴方向复制像素。
pub fn draw_line(
    frame_buffer: &mut FrameBuffer,
    p0_clip: &Vector4<f32>,
    p1_clip: &Vector4<f32>,
    style: LineStyle,
) {
    let Some((c0, c1)) = clip_line(p0_clip, p1_clip) else {
        return;
    };

    let width = frame_buffer.width as f32;
    let height = frame_buffer.height as f32;
    let s0 = ndc_to_pixel(&clip_to_ndc(&c0), width, height);
    let s1 = ndc_to_pixel(&clip_to_ndc(&c1), width, height);

    draw_screen_line(frame_buffer, &s0, &s1, style);
}

/// 在屏幕空间绘制线段，点的z分量为[0,1]深度
///
/// 沿主轴逐个整数像素步进（从起点所在像素到终点所在像素），
/// 在像素中心处按斜率求次轴坐标和深度，保证主轴方向上没有空洞。
pub fn draw_screen_line(
    frame_buffer: &mut FrameBuffer,
    s0: &Point3<f32>,
    s1: &Point3<f32>,
    style: LineStyle,
) {
    let dx = s1.x - s0.x;
    let dy = s1.y - s0.y;
    let dz = s1.z - s0.z;
    let x_major = dx.abs() >= dy.abs();

    let (major_start, major_span) = if x_major { (s0.x, dx) } else { (s0.y, dy) };
    let major_end = major_start + major_span;
    let first = major_start.min(major_end).floor() as i64;
    let last = major_start.max(major_end).floor() as i64;

    let line_width = style.width.max(1) as i64;
    let first_offset = -(line_width - 1) / 2;

    for m in first..=last {
        // 像素中心对应的参数，端点像素限制在线段范围内
        let t = if major_span.abs() > f32::EPSILON {
            ((m as f32 + 0.5 - major_start) / major_span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let depth = s0.z + dz * t;
        let (px, py) = if x_major {
            (m, (s0.y + dy * t).floor() as i64)
        } else {
            ((s0.x + dx * t).floor() as i64, m)
        };

        for k in 0..line_width {
            let offset = first_offset + k;
            if x_major {
                frame_buffer.put_pixel(px, py + offset, depth, style.color);
            } else {
                frame_buffer.put_pixel(px + offset, py, depth, style.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: LineStyle = LineStyle {
        color: [255, 255, 255],
        width: 1,
    };

    fn lit_pixels(fb: &FrameBuffer) -> Vec<(usize, usize)> {
        let mut lit = Vec::new();
        for y in 0..fb.height {
            for x in 0..fb.width {
                if fb.pixel(x, y) != [0, 0, 0] {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    #[test]
    fn test_clip_keeps_inside_segment() {
        let p0 = Vector4::new(-0.5, 0.0, 0.0, 1.0);
        let p1 = Vector4::new(0.5, 0.2, 0.1, 1.0);
        let (a, b) = clip_line(&p0, &p1).expect("visible");
        assert_eq!(a, p0);
        assert_eq!(b, p1);
    }

    #[test]
    fn test_clip_rejects_segment_behind_near_plane() {
        let p0 = Vector4::new(0.0, 0.0, -2.0, 1.0);
        let p1 = Vector4::new(0.5, 0.0, -3.0, 1.0);
        assert!(clip_line(&p0, &p1).is_none());
    }

    #[test]
    fn test_clip_trims_to_boundary() {
        let p0 = Vector4::new(-2.0, 0.0, 0.0, 1.0);
        let p1 = Vector4::new(2.0, 0.0, 0.0, 1.0);
        let (a, b) = clip_line(&p0, &p1).expect("visible");
        assert!((a.x - -1.0).abs() < 1e-6);
        assert!((b.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_horizontal_line_covers_span() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.clear([0, 0, 0]);
        draw_screen_line(
            &mut fb,
            &Point3::new(2.5, 4.5, 0.5),
            &Point3::new(7.5, 4.5, 0.5),
            WHITE,
        );
        let lit = lit_pixels(&fb);
        assert_eq!(lit, (2..=7).map(|x| (x, 4)).collect::<Vec<_>>());
    }

    #[test]
    fn test_wide_line_replicates_along_minor_axis() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.clear([0, 0, 0]);
        draw_screen_line(
            &mut fb,
            &Point3::new(4.5, 1.5, 0.5),
            &Point3::new(4.5, 5.5, 0.5),
            LineStyle {
                color: [255, 0, 0],
                width: 2,
            },
        );
        let lit = lit_pixels(&fb);
        assert_eq!(lit.len(), 10);
        assert!(lit.iter().all(|&(x, y)| (x == 4 || x == 5) && (1..=5).contains(&y)));
    }

    #[test]
    fn test_nearer_line_wins_depth_test() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.clear([0, 0, 0]);
        let near = LineStyle {
            color: [0, 255, 0],
            width: 1,
        };
        draw_screen_line(
            &mut fb,
            &Point3::new(0.5, 5.5, 0.2),
            &Point3::new(9.5, 5.5, 0.2),
            near,
        );
        draw_screen_line(
            &mut fb,
            &Point3::new(5.5, 0.5, 0.8),
            &Point3::new(5.5, 9.5, 0.8),
            WHITE,
        );
        assert_eq!(fb.pixel(5, 5), [0, 255, 0]);
        assert_eq!(fb.pixel(5, 2), [255, 255, 255]);
    }

    #[test]
    fn test_clip_space_line_maps_to_viewport() {
        let mut fb = FrameBuffer::new(20, 20);
        fb.clear([0, 0, 0]);
        // 穿过视口中心的竖线，两端超出视口
        draw_line(
            &mut fb,
            &Vector4::new(0.0, -3.0, 0.0, 1.0),
            &Vector4::new(0.0, 3.0, 0.0, 1.0),
            WHITE,
        );
        let lit = lit_pixels(&fb);
        assert!(lit.iter().all(|&(x, _)| x == 10));
        assert_eq!(lit.len(), 20);
    }

    #[test]
    fn test_clipped_line_lights_every_row() {
        // 裁剪后端点落在像素边界附近（例如 y = -0.9999999）
        for &(width, height) in &[(20, 20), (17, 23), (64, 48), (7, 101)] {
            let mut fb = FrameBuffer::new(width, height);
            fb.clear([0, 0, 0]);
            draw_line(
                &mut fb,
                &Vector4::new(0.0, -3.0, 0.0, 1.0),
                &Vector4::new(0.0, 3.0, 0.0, 1.0),
                WHITE,
            );

            let lit = lit_pixels(&fb);
            let missing: Vec<usize> = (0..height)
                .filter(|&y| !lit.iter().any(|&(_, ly)| ly == y))
                .collect();
            assert!(missing.is_empty(), "{}x{} missing rows {:?}", width, height, missing);
        }
    }

    #[test]
    fn test_diagonal_line_has_one_pixel_per_column() {
        let mut fb = FrameBuffer::new(40, 40);
        fb.clear([0, 0, 0]);
        draw_screen_line(
            &mut fb,
            &Point3::new(0.3, 2.9, 0.5),
            &Point3::new(37.7, 21.1, 0.5),
            WHITE,
        );

        let lit = lit_pixels(&fb);
        for x in 0..=37 {
            assert_eq!(lit.iter().filter(|&&(lx, _)| lx == x).count(), 1, "column {}", x);
        }
        assert_eq!(lit.len(), 38);

        // 相邻列的行号最多相差1
        let mut rows: Vec<(usize, usize)> = lit.clone();
        rows.sort();
        assert!(rows.windows(2).all(|w| w[1].1.abs_diff(w[0].1) <= 1));
        assert!(rows.contains(&(0, 2)));
        assert!(rows.contains(&(37, 21)));
    }
}
