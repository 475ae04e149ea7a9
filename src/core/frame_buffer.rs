use image::RgbImage;
use rayon::prelude::*;

/// 帧缓冲区实现，存储渲染结果（左上角为原点）
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// 存储[0,1]深度值，数值越小表示越近
    depth_buffer: Vec<f32>,
    /// 存储RGB颜色值 [0, 255]
    color_buffer: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let num_pixels = width * height;
        FrameBuffer {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; num_pixels],
            color_buffer: vec![0; num_pixels * 3],
        }
    }

    /// 清除颜色和深度缓冲区
    pub fn clear(&mut self, color: [u8; 3]) {
        self.depth_buffer
            .par_iter_mut()
            .for_each(|depth| *depth = f32::INFINITY);

        self.color_buffer
            .par_chunks_exact_mut(3)
            .for_each(|pixel| pixel.copy_from_slice(&color));
    }

    /// 深度测试后写入像素（GL_LESS语义），越界像素直接丢弃
    ///
    /// 返回是否写入。
    pub fn put_pixel(&mut self, x: i64, y: i64, depth: f32, color: [u8; 3]) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }

        let buffer_index = y as usize * self.width + x as usize;
        if depth >= self.depth_buffer[buffer_index] {
            return false;
        }

        self.depth_buffer[buffer_index] = depth;
        let color_index = buffer_index * 3;
        self.color_buffer[color_index..color_index + 3].copy_from_slice(&color);
        true
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let color_index = (y * self.width + x) * 3;
        [
            self.color_buffer[color_index],
            self.color_buffer[color_index + 1],
            self.color_buffer[color_index + 2],
        ]
    }

    /// 获取颜色缓冲区的字节数据
    pub fn get_color_buffer_bytes(&self) -> Vec<u8> {
        self.color_buffer.clone()
    }

    /// 获取深度缓冲区的浮点数据
    #[cfg(test)]
    pub fn get_depth_buffer_f32(&self) -> Vec<f32> {
        self.depth_buffer.clone()
    }

    /// 读回为RGB图像
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_raw(
            self.width as u32,
            self.height as u32,
            self.color_buffer.clone(),
        )
        .unwrap_or_else(|| RgbImage::new(self.width as u32, self.height as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_fills_color_and_resets_depth() {
        let mut fb = FrameBuffer::new(4, 3);
        assert!(fb.put_pixel(1, 1, 0.5, [255, 0, 0]));
        fb.clear([51, 51, 51]);

        assert!(fb.get_color_buffer_bytes().iter().all(|&c| c == 51));
        assert!(fb.get_depth_buffer_f32().iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_depth_test_keeps_nearest() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.clear([0, 0, 0]);
        assert!(fb.put_pixel(0, 1, 0.5, [255, 0, 0]));
        assert!(!fb.put_pixel(0, 1, 0.7, [0, 255, 0]));
        assert!(!fb.put_pixel(0, 1, 0.5, [0, 255, 0]));
        assert!(fb.put_pixel(0, 1, 0.2, [0, 0, 255]));
        assert_eq!(fb.pixel(0, 1), [0, 0, 255]);
    }

    #[test]
    fn test_out_of_bounds_is_discarded() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(!fb.put_pixel(-1, 0, 0.0, [1, 1, 1]));
        assert!(!fb.put_pixel(0, 2, 0.0, [1, 1, 1]));
        assert!(!fb.put_pixel(2, 0, 0.0, [1, 1, 1]));
    }

    #[test]
    fn test_to_image_matches_buffer() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.clear([10, 20, 30]);
        fb.put_pixel(2, 1, 0.1, [200, 100, 50]);
        let image = fb.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [200, 100, 50]);
        assert_eq!(image.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(image.as_raw(), &fb.get_color_buffer_bytes());
    }
}
