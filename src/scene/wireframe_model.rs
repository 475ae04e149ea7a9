use nalgebra::Point3;

/// 字形轮廓点（z=0平面，未缩放）
const GLYPH_OUTLINE: [(f32, f32); 12] = [
    (0.0, 0.0),
    (0.0, 3.0),
    (0.0, 8.0),
    (-2.0, 8.0),
    (-2.0, 5.0),
    (-4.0, 5.0),
    (-4.0, 8.0),
    (-6.0, 8.0),
    (-6.0, 4.0),
    (-5.0, 3.0),
    (-2.0, 3.0),
    (-2.0, 0.0),
];

/// 挤出深度（未缩放）
const EXTRUSION_DEPTH: f32 = 1.0;

/// 整体缩小系数
const GLYPH_SCALE_DIVISOR: f32 = 3.0;

/// 线框模型：顶点与边在构造后不可变
#[derive(Debug, Clone)]
pub struct WireframeModel {
    vertices: Vec<Point3<f32>>,
    edges: Vec<[usize; 2]>,
}

impl WireframeModel {
    /// 将平面轮廓沿Z轴挤出，生成前面、背面和连接支柱三组边
    pub fn extrude(outline: &[(f32, f32)], depth: f32, divisor: f32) -> Self {
        let n = outline.len();

        let front = outline
            .iter()
            .map(|&(x, y)| Point3::new(x / divisor, y / divisor, 0.0));
        let back = outline
            .iter()
            .map(|&(x, y)| Point3::new(x / divisor, y / divisor, depth / divisor));
        let vertices = front.chain(back).collect();

        let front_edges = (0..n).map(|i| [i, (i + 1) % n]);
        let back_edges = (0..n).map(|i| [i + n, (i + 1) % n + n]);
        let struts = (0..n).map(|i| [i, i + n]);
        let edges = front_edges.chain(back_edges).chain(struts).collect();

        Self { vertices, edges }
    }

    /// 演示用的字母字形：24个顶点、36条边
    pub fn letter_glyph() -> Self {
        Self::extrude(&GLYPH_OUTLINE, EXTRUSION_DEPTH, GLYPH_SCALE_DIVISOR)
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// 按边迭代两个端点
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (&Point3<f32>, &Point3<f32>)> + '_ {
        self.edges
            .iter()
            .map(|&[a, b]| (&self.vertices[a], &self.vertices[b]))
    }
}
