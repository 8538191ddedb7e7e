use std::path::PathBuf;

use thiserror::Error;

use crate::gfx::shader::ShaderStage;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No OpenGL context available. The glow renderer is required")]
    NoGlContext,
    #[error("OpenGL {found} is not supported, need desktop OpenGL {required} or newer")]
    UnsupportedGl { found: String, required: String },
    #[error("OpenGL object creation failed: {0}")]
    Gl(String),
    #[error("Could not read shader source {}: {source}", .path.display())]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("Failed to link shader program: {log}")]
    ShaderLink { log: String },
    #[error("Mesh has {len} vertices, which is not a whole number of triangles")]
    MeshLayout { len: usize },
    #[error("Window creation failed: {0}")]
    Window(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = AppError::MeshLayout { len: 4 };
        assert_eq!(
            err.to_string(),
            "Mesh has 4 vertices, which is not a whole number of triangles"
        );

        let err = AppError::UnsupportedGl {
            found: "2.1".into(),
            required: "3.3".into(),
        };
        assert!(err.to_string().contains("3.3"));

        let err = AppError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:1(1): error: syntax error".into(),
        };
        assert!(err.to_string().starts_with("Failed to compile fragment shader"));
    }

    #[test]
    fn read_error_keeps_io_source() {
        use std::error::Error as _;

        let err = AppError::ShaderRead {
            path: PathBuf::from("Shaders/missing.vs"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("Shaders/missing.vs"));
        assert!(err.source().is_some());
    }
}
