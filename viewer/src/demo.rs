use cgmath::{Matrix4, SquareMatrix};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder, Uniform};
use gl_wrapper::renderer::GlRenderer;

use triangles::camera::{model_view_projection, OrbitCamera, Projection};
use triangles::config::DemoConfig;
use triangles::shader_source;
use triangles::{DemoKind, Scene};

use crate::app::AppError;

const MVP_UNIFORM: &str = "MVP";

struct BatchProgram {
    program: Program,
    mvp: Option<Uniform>,
}

/// GPU state of one demo. Needs a current GL context for its whole lifetime.
pub struct Demo {
    kind: DemoKind,
    scene: Scene,
    geometry: Geometry,
    programs: Vec<BatchProgram>,
    renderer: GlRenderer,
    projection: Projection,
    camera: OrbitCamera,
    model: Matrix4<f32>,
}

impl Demo {
    pub fn new(kind: DemoKind, config: &DemoConfig) -> Result<Self, AppError> {
        let scene = Scene::two_triangles();

        let sources = shader_source::load_programs(&config.shader_dir, kind, &scene)?;

        let mut programs = Vec::with_capacity(sources.len());
        for src in &sources {
            let program = ProgramBuilder::new(&src.vertex.code, &src.fragment.code)
                .build()
                .map_err(|source| AppError::Program {
                    vertex: src.vertex.path.clone(),
                    fragment: src.fragment.path.clone(),
                    source,
                })?;

            let mvp = if kind.is_animated() {
                let uniform =
                    program
                        .uniform_location(MVP_UNIFORM)
                        .map_err(|source| AppError::Program {
                            vertex: src.vertex.path.clone(),
                            fragment: src.fragment.path.clone(),
                            source,
                        })?;
                Some(uniform)
            } else {
                None
            };

            programs.push(BatchProgram { program, mvp });
        }

        let geometry = GeometryBuilder::new(scene.vertices())
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        let renderer = GlRenderer::new();
        let [r, g, b, a] = config.clear_color;
        renderer.set_clear_color(r, g, b, a);
        if config.blending {
            renderer.enable_alpha_blending();
        }

        log::info!(
            "{:?} demo ready: {} programs, {} vertices",
            kind,
            programs.len(),
            geometry.vertices()
        );

        Ok(Self {
            kind,
            scene,
            geometry,
            programs,
            renderer,
            projection: config.projection(),
            camera: config.orbit_camera(),
            model: Matrix4::identity(),
        })
    }

    pub fn is_animated(&self) -> bool {
        self.kind.is_animated()
    }

    pub fn advance(&mut self) {
        self.camera.advance();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.projection.set_viewport(width, height);
    }

    pub fn render(&mut self) {
        self.renderer.clear();

        let mvp = self
            .is_animated()
            .then(|| model_view_projection(&self.projection, &self.camera.view(), &self.model));

        for (batch, entry) in self.scene.batches().iter().zip(&self.programs) {
            self.renderer.use_program(&entry.program);

            if let (Some(uniform), Some(mvp)) = (entry.mvp, mvp.as_ref()) {
                let columns: &[f32; 16] = mvp.as_ref();
                entry.program.set_mat4(uniform, columns);
            }

            self.renderer
                .draw_range(&self.geometry, &entry.program, batch.first, batch.count);
        }
    }
}
