use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scene::{DemoKind, Scene};

#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub path: PathBuf,
    pub code: String,
}

impl ShaderSource {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref().to_path_buf();

        let code = std::fs::read_to_string(&path).map_err(|source| SourceError::Read {
            path: path.clone(),
            source,
        })?;

        if code.trim().is_empty() {
            return Err(SourceError::Empty(path));
        }

        log::debug!("read shader {:?} ({} bytes)", path, code.len());

        Ok(Self { path, code })
    }
}

/// Vertex and fragment stage of one GL program.
#[derive(Debug, Clone)]
pub struct ProgramSources {
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
}

pub fn load_program<P: AsRef<Path>>(
    dir: P,
    vertex_name: &str,
    fragment_name: &str,
) -> Result<ProgramSources, SourceError> {
    let dir = dir.as_ref();

    Ok(ProgramSources {
        vertex: ShaderSource::read(dir.join(vertex_name))?,
        fragment: ShaderSource::read(dir.join(fragment_name))?,
    })
}

/// Sources for every batch of `scene`, in draw order.
pub fn load_programs<P: AsRef<Path>>(
    dir: P,
    kind: DemoKind,
    scene: &Scene,
) -> Result<Vec<ProgramSources>, SourceError> {
    scene
        .batches()
        .iter()
        .map(|batch| load_program(dir.as_ref(), kind.vertex_shader(), batch.fragment_shader))
        .collect()
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read shader {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("shader {0:?} is empty")]
    Empty(PathBuf),
}
