use std::sync::Arc;

use eframe::{egui, egui_glow, glow};
use egui::mutex::Mutex;

use crate::config;
use crate::error::{AppError, AppResult};
use crate::gfx::shader::MatrixUniforms;
use crate::gfx::transform::Transforms;
use crate::gfx::viewport::ResizeTracker;
use crate::gfx::{Mesh, Model, Shader};

/// Opens the window and runs the render loop until the window is closed.
pub fn run() -> AppResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config::WIDTH as f32, config::HEIGHT as f32])
            .with_title(config::TITLE),
        depth_buffer: 24,

        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    eframe::run_native(
        config::TITLE,
        options,
        Box::new(|cc| {
            let app: Box<dyn eframe::App> = Box::new(CubeApp::new(cc)?);
            Ok(app)
        }),
    )
    .map_err(|e| AppError::Window(e.to_string()))
}

/// Refuses anything older than [`config::MIN_GL_VERSION`] and GLES contexts.
pub fn check_gl_version(major: u32, minor: u32, is_embedded: bool) -> AppResult<()> {
    let (req_major, req_minor) = config::MIN_GL_VERSION;
    if is_embedded || (major, minor) < (req_major, req_minor) {
        let found = if is_embedded {
            format!("ES {major}.{minor}")
        } else {
            format!("{major}.{minor}")
        };
        return Err(AppError::UnsupportedGl {
            found,
            required: format!("{req_major}.{req_minor}"),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

impl LoopState {
    pub fn next(self, close_requested: bool) -> Self {
        match self {
            Self::Running if close_requested => Self::Closed,
            state => state,
        }
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Everything the paint callback touches. Only ever used on the GL thread; the mutex is
/// there because [`egui::PaintCallback`] wants `Send + Sync`.
pub struct Renderer {
    shader: Shader,
    uniforms: MatrixUniforms,
    mesh: Mesh,
    transforms: Transforms,
    resize: ResizeTracker,
}

impl Renderer {
    pub fn new(gl: &glow::Context) -> AppResult<Self> {
        let shader = Shader::from_files(
            gl,
            config::VERTEX_SHADER_PATH,
            config::FRAGMENT_SHADER_PATH,
            config::SHADER_FAILURE_POLICY,
        )?;
        let uniforms = MatrixUniforms::locate(gl, &shader);

        let mut mesh = Mesh::cube()?;
        if let Err(e) = mesh.setup_gl(gl) {
            shader.destroy(gl);
            return Err(e);
        }
        log::info!("Uploaded cube mesh with {} vertices", mesh.vertex_count());

        Ok(Self {
            shader,
            uniforms,
            mesh,
            transforms: Transforms::new(),
            resize: ResizeTracker::default(),
        })
    }

    pub fn on_framebuffer_resize(&mut self, gl: &glow::Context, width: u32, height: u32) {
        let (viewport, _) = self.resize.on_framebuffer_size(width, height);
        viewport.apply(gl);
    }

    /// Draws one frame.
    pub fn paint(&mut self, gl: &glow::Context, framebuffer: [u32; 2]) {
        self.on_framebuffer_resize(gl, framebuffer[0], framebuffer[1]);

        unsafe {
            use glow::HasContext as _;

            // egui turns depth testing off for its own passes, so it is set again every frame
            gl.enable(glow::DEPTH_TEST);
            let [r, g, b, a] = config::CLEAR_COLOR;
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.transforms.advance();

        self.shader.use_program(gl);
        let view = self.transforms.camera.get_mtx();
        self.shader
            .set_mat4(gl, self.uniforms.projection.as_ref(), &self.transforms.projection);
        self.shader.set_mat4(gl, self.uniforms.view.as_ref(), &view);
        self.shader
            .set_mat4(gl, self.uniforms.model.as_ref(), &self.transforms.model);

        self.mesh.draw(gl);
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        self.mesh.destroy_gl(gl);
        self.shader.destroy(gl);
    }
}

pub struct CubeApp {
    renderer: Arc<Mutex<Renderer>>,
    state: LoopState,
}

impl CubeApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> AppResult<Self> {
        let gl = cc.gl.as_ref().ok_or(AppError::NoGlContext)?;

        {
            use glow::HasContext as _;

            let version = gl.version();
            log::info!(
                "OpenGL {}.{} ({})",
                version.major,
                version.minor,
                version.vendor_info
            );
            check_gl_version(version.major, version.minor, version.is_embedded)?;
        }

        let renderer = Renderer::new(gl)?;

        Ok(Self {
            renderer: Arc::new(Mutex::new(renderer)),
            state: LoopState::Running,
        })
    }

    fn custom_painting(&mut self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let renderer = self.renderer.clone();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                renderer.lock().paint(painter.gl(), info.screen_size_px);
            })),
        };
        ui.painter().add(callback);
    }
}

impl eframe::App for CubeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let close_requested = ctx.input(|i| i.viewport().close_requested());
        let prev = self.state;
        self.state = self.state.next(close_requested);

        if !self.state.is_running() {
            if prev.is_running() {
                log::info!("Close requested, leaving render loop");
            }
            return;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.custom_painting(ui));

        // Continuous rendering, there is no frame pacing beyond vsync
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.renderer.lock().destroy(gl);
            log::info!("Released GL resources");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_ends_the_loop() {
        let state = LoopState::Running;
        assert_eq!(state.next(false), LoopState::Running);
        assert_eq!(state.next(true), LoopState::Closed);
    }

    #[test]
    fn closed_is_terminal() {
        let state = LoopState::Closed;
        assert_eq!(state.next(false), LoopState::Closed);
        assert_eq!(state.next(true), LoopState::Closed);
        assert!(!state.is_running());
    }

    #[test]
    fn loop_runs_until_first_close_request() {
        let requests = [false, false, false, true, false];
        let mut state = LoopState::Running;
        let mut frames = 0;
        for close in requests {
            state = state.next(close);
            if state.is_running() {
                frames += 1;
            }
        }
        assert_eq!(frames, 3);
        assert_eq!(state, LoopState::Closed);
    }

    #[test]
    fn accepts_gl_33_and_newer() {
        assert!(check_gl_version(3, 3, false).is_ok());
        assert!(check_gl_version(4, 1, false).is_ok());
        assert!(check_gl_version(4, 6, false).is_ok());
    }

    #[test]
    fn rejects_old_or_embedded_gl() {
        match check_gl_version(2, 1, false) {
            Err(AppError::UnsupportedGl { found, required }) => {
                assert_eq!(found, "2.1");
                assert_eq!(required, "3.3");
            }
            other => panic!("expected UnsupportedGl, got {other:?}"),
        }
        assert!(check_gl_version(3, 2, false).is_err());

        match check_gl_version(3, 0, true) {
            Err(AppError::UnsupportedGl { found, .. }) => assert_eq!(found, "ES 3.0"),
            other => panic!("expected UnsupportedGl, got {other:?}"),
        }
    }
}
