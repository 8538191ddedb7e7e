use std::fmt;
use std::fs;
use std::path::Path;

use eframe::glow;
use glam::Mat4;

use crate::config::SHADER_LOG_CAPACITY;
use crate::error::{AppError, AppResult};

/// Stand-in for a diagnostic log the driver left empty.
const EMPTY_LOG: &str = "(driver returned no diagnostic output)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// How shader building reacts to a missing source file or a failed compile/link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderFailurePolicy {
    /// Log the problem and hand it back to the caller.
    #[default]
    FailFast,
    /// Log the problem and keep going. Missing files read as empty source and a broken
    /// stage or link still yields a program handle, which then draws nothing.
    #[allow(dead_code)]
    Continue,
}

impl ShaderFailurePolicy {
    /// Logs `err`, then either returns it or swallows it.
    pub fn handle(self, err: AppError) -> AppResult<()> {
        log::error!("{err}");
        match self {
            Self::FailFast => Err(err),
            Self::Continue => {
                log::warn!("Continuing after shader error, rendering output will be wrong");
                Ok(())
            }
        }
    }
}

/// Reads a whole shader file. Under [`ShaderFailurePolicy::Continue`] an unreadable file
/// becomes an empty string.
pub fn read_source(path: &Path, policy: ShaderFailurePolicy) -> AppResult<String> {
    match fs::read_to_string(path) {
        Ok(src) => Ok(src),
        Err(source) => {
            policy.handle(AppError::ShaderRead {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(String::new())
        }
    }
}

/// Trims a driver info log to [`SHADER_LOG_CAPACITY`] bytes, never returning an empty string.
pub fn diagnostic_log(raw: &str) -> String {
    let raw = raw.trim_end();
    if raw.is_empty() {
        return EMPTY_LOG.to_owned();
    }

    let mut end = raw.len().min(SHADER_LOG_CAPACITY);
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    raw[..end].to_owned()
}

/// A linked vertex + fragment program. `glow::Program` wraps a non-zero GL name, so
/// holding one means the driver handed out a valid object.
#[derive(Debug, Clone)]
pub struct Shader(glow::Program);

impl Shader {
    pub fn from_files(
        gl: &glow::Context,
        vtx_path: impl AsRef<Path>,
        frag_path: impl AsRef<Path>,
        policy: ShaderFailurePolicy,
    ) -> AppResult<Self> {
        let vtx = read_source(vtx_path.as_ref(), policy)?;
        let frag = read_source(frag_path.as_ref(), policy)?;

        log::info!(
            "Building shader program from {} and {}",
            vtx_path.as_ref().display(),
            frag_path.as_ref().display()
        );
        Self::from_src(gl, &vtx, &frag, policy)
    }

    pub fn from_src(
        gl: &glow::Context,
        vtx: &str,
        frag: &str,
        policy: ShaderFailurePolicy,
    ) -> AppResult<Self> {
        use glow::HasContext as _;

        unsafe {
            let program = gl.create_program().map_err(AppError::Gl)?;

            let mut shaders = Vec::with_capacity(2);
            for (stage, source) in [(ShaderStage::Vertex, vtx), (ShaderStage::Fragment, frag)] {
                match compile_stage(gl, stage, source, policy) {
                    Ok(shader) => {
                        gl.attach_shader(program, shader);
                        shaders.push(shader);
                    }
                    Err(e) => {
                        for shader in shaders {
                            gl.detach_shader(program, shader);
                            gl.delete_shader(shader);
                        }
                        gl.delete_program(program);
                        return Err(e);
                    }
                }
            }

            gl.link_program(program);
            let linked = if gl.get_program_link_status(program) {
                Ok(())
            } else {
                policy.handle(AppError::ShaderLink {
                    log: diagnostic_log(&gl.get_program_info_log(program)),
                })
            };

            // Stage objects are only needed until the link is done
            for shader in shaders {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }

            if let Err(e) = linked {
                gl.delete_program(program);
                return Err(e);
            }

            Ok(Self(program))
        }
    }

    pub fn uniform_location(&self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        use glow::HasContext as _;

        let location = unsafe { gl.get_uniform_location(self.0, name) };
        if location.is_none() {
            log::warn!("Uniform `{name}` is not active in the shader program");
        }
        location
    }

    /// Uploads a column-major matrix, no transpose.
    pub fn set_mat4(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>, mtx: &Mat4) {
        use glow::HasContext as _;

        unsafe {
            gl.uniform_matrix_4_f32_slice(location, false, &mtx.to_cols_array());
        }
    }

    pub fn use_program(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.use_program(Some(self.0));
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            gl.delete_program(self.0);
        }
    }
}

unsafe fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
    policy: ShaderFailurePolicy,
) -> AppResult<glow::Shader> {
    use glow::HasContext as _;

    let shader = gl.create_shader(stage.gl_type()).map_err(AppError::Gl)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = diagnostic_log(&gl.get_shader_info_log(shader));
        if let Err(e) = policy.handle(AppError::ShaderCompile { stage, log }) {
            gl.delete_shader(shader);
            return Err(e);
        }
    }

    Ok(shader)
}

/// Locations of the three transform uniforms, looked up once after linking.
#[derive(Debug, Clone, Default)]
pub struct MatrixUniforms {
    pub projection: Option<glow::UniformLocation>,
    pub view: Option<glow::UniformLocation>,
    pub model: Option<glow::UniformLocation>,
}

impl MatrixUniforms {
    pub fn locate(gl: &glow::Context, shader: &Shader) -> Self {
        Self {
            projection: shader.uniform_location(gl, "projection"),
            view: shader.uniform_location(gl, "view"),
            model: shader.uniform_location(gl, "model"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn short_log_is_kept() {
        let raw = "0:3(1): error: syntax error, unexpected IDENTIFIER\n";
        assert_eq!(
            diagnostic_log(raw),
            "0:3(1): error: syntax error, unexpected IDENTIFIER"
        );
    }

    #[test]
    fn empty_log_is_never_reported_empty() {
        assert_eq!(diagnostic_log(""), EMPTY_LOG);
        assert_eq!(diagnostic_log(" \n"), EMPTY_LOG);
    }

    #[test]
    fn long_log_is_capped() {
        let raw = "e".repeat(SHADER_LOG_CAPACITY * 3);
        assert_eq!(diagnostic_log(&raw).len(), SHADER_LOG_CAPACITY);
    }

    #[test]
    fn cap_lands_on_char_boundary() {
        // Two-byte chars with an odd prefix put the cap in the middle of a char
        let raw = format!("x{}", "é".repeat(SHADER_LOG_CAPACITY));
        let log = diagnostic_log(&raw);
        assert!(log.len() <= SHADER_LOG_CAPACITY);
        assert_eq!(log.len(), SHADER_LOG_CAPACITY - 1);
        assert!(log.starts_with("xé"));
    }

    #[test]
    fn fail_fast_returns_the_error() {
        let err = AppError::ShaderLink {
            log: "undefined reference".into(),
        };
        match ShaderFailurePolicy::FailFast.handle(err) {
            Err(AppError::ShaderLink { log }) => assert_eq!(log, "undefined reference"),
            other => panic!("expected link error, got {other:?}"),
        }
    }

    #[test]
    fn continue_swallows_the_error() {
        let err = AppError::ShaderCompile {
            stage: ShaderStage::Vertex,
            log: "syntax error".into(),
        };
        assert!(ShaderFailurePolicy::Continue.handle(err).is_ok());
    }

    #[test]
    fn default_policy_fails_fast() {
        assert_eq!(ShaderFailurePolicy::default(), ShaderFailurePolicy::FailFast);
    }

    #[test]
    fn reads_existing_source() {
        let path = std::env::temp_dir().join(format!("cube_viewer_{}.vs", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "#version 330 core\nvoid main() {{}}\n").unwrap();
        drop(file);

        let src = read_source(&path, ShaderFailurePolicy::FailFast).unwrap();
        assert!(src.starts_with("#version 330 core"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_source_depends_on_policy() {
        let path = Path::new("Shaders/does_not_exist.vs");

        match read_source(path, ShaderFailurePolicy::FailFast) {
            Err(AppError::ShaderRead { path: got, .. }) => assert_eq!(got, path),
            other => panic!("expected read error, got {other:?}"),
        }

        assert_eq!(read_source(path, ShaderFailurePolicy::Continue).unwrap(), "");
    }

    #[test]
    fn shipped_shaders_declare_the_matrix_uniforms() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let policy = ShaderFailurePolicy::FailFast;
        let vtx = read_source(&root.join(crate::config::VERTEX_SHADER_PATH), policy).unwrap();
        let frag = read_source(&root.join(crate::config::FRAGMENT_SHADER_PATH), policy).unwrap();

        for name in ["projection", "view", "model"] {
            assert!(vtx.contains(&format!("uniform mat4 {name};")), "{name}");
        }
        assert!(vtx.contains("layout (location = 0) in vec3"));
        assert!(vtx.contains("layout (location = 1) in vec3"));
        assert!(frag.starts_with("#version 330 core"));
    }
}
