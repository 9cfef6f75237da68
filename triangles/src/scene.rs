/// Floats per vertex position.
pub const COMPONENTS_PER_VERTEX: usize = 3;

#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 18] = [
    -0.5, 0.5, 0.0,
    0.5, 0.2, 0.0,
    0.1, -0.5, 0.0,
    -0.7, -0.6, 0.0,
    0.1, 0.1, 0.0,
    0.4, -0.7, 0.0,
];

pub const FRAGMENT_SHADERS: [&str; 2] = [
    "TriangleFragmentShader1.fragmentshader",
    "TriangleFragmentShader2.fragmentshader",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DemoKind {
    /// Untransformed triangles, redrawn on demand.
    Static,
    /// Triangles seen through a camera orbiting the origin.
    Rotating,
}

impl DemoKind {
    pub fn default_title(self) -> &'static str {
        match self {
            DemoKind::Static => "Red and green triangles",
            DemoKind::Rotating => "Two rotating triangles",
        }
    }

    pub fn vertex_shader(self) -> &'static str {
        match self {
            DemoKind::Static => "VertexShader.vertexshader",
            DemoKind::Rotating => "SimpleTransform.vertexshader",
        }
    }

    pub fn is_animated(self) -> bool {
        matches!(self, DemoKind::Rotating)
    }
}

/// A contiguous run of vertices drawn with its own fragment shader.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    pub first: usize,
    pub count: usize,
    pub fragment_shader: &'static str,
}

#[derive(Debug, Clone)]
pub struct Scene {
    vertices: &'static [f32],
    batches: Vec<DrawBatch>,
}

impl Scene {
    pub fn two_triangles() -> Self {
        let batches = FRAGMENT_SHADERS
            .iter()
            .enumerate()
            .map(|(i, fragment_shader)| DrawBatch {
                first: i * 3,
                count: 3,
                fragment_shader: *fragment_shader,
            })
            .collect();

        Self {
            vertices: &TRIANGLE_VERTICES,
            batches,
        }
    }

    pub fn vertices(&self) -> &[f32] {
        self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / COMPONENTS_PER_VERTEX
    }

    pub fn batches(&self) -> &[DrawBatch] {
        &self.batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_batch_per_triangle() {
        let scene = Scene::two_triangles();

        assert_eq!(scene.vertex_count(), 6);
        assert_eq!(
            scene.batches(),
            &[
                DrawBatch {
                    first: 0,
                    count: 3,
                    fragment_shader: "TriangleFragmentShader1.fragmentshader",
                },
                DrawBatch {
                    first: 3,
                    count: 3,
                    fragment_shader: "TriangleFragmentShader2.fragmentshader",
                },
            ]
        );
    }

    #[test]
    fn batches_stay_inside_vertex_data() {
        let scene = Scene::two_triangles();

        for batch in scene.batches() {
            assert!(batch.first + batch.count <= scene.vertex_count());
        }
    }

    #[test]
    fn triangles_lie_in_the_xy_plane() {
        for vertex in TRIANGLE_VERTICES.chunks(COMPONENTS_PER_VERTEX) {
            assert_eq!(vertex[2], 0.0);
            assert!(vertex[0].abs() <= 1.0 && vertex[1].abs() <= 1.0);
        }
    }

    #[test]
    fn demo_kinds() {
        assert_eq!(DemoKind::Static.default_title(), "Red and green triangles");
        assert_eq!(DemoKind::Rotating.default_title(), "Two rotating triangles");
        assert_eq!(
            DemoKind::Rotating.vertex_shader(),
            "SimpleTransform.vertexshader"
        );
        assert!(!DemoKind::Static.is_animated());
        assert!(DemoKind::Rotating.is_animated());
    }
}
