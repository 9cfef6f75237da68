use std::ffi::{c_char, c_void, CStr};

use thiserror::Error;

pub mod geometry;
pub mod program;
pub mod renderer;

/// Every entry point this crate calls, all part of core OpenGL 3.3.
const REQUIRED: &[(&str, fn() -> bool)] = &[
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glBindVertexArray", gl::BindVertexArray::is_loaded),
    ("glBlendFunc", gl::BlendFunc::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
    ("glDeleteProgram", gl::DeleteProgram::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
    ("glDetachShader", gl::DetachShader::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
    ("glEnable", gl::Enable::is_loaded),
    ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetString", gl::GetString::is_loaded),
    ("glGetUniformLocation", gl::GetUniformLocation::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glUniformMatrix4fv", gl::UniformMatrix4fv::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glViewport", gl::Viewport::is_loaded),
];

/// Loads GL function pointers and checks that everything the renderer needs resolved.
pub fn load_with<F>(loader: F) -> Result<(), LoadError>
where
    F: FnMut(&'static str) -> *const c_void,
{
    gl::load_with(loader);

    let missing: Vec<&'static str> = REQUIRED
        .iter()
        .filter(|(_, is_loaded)| !is_loaded())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(LoadError::MissingFunctions(missing));
    }

    log::debug!("loaded {} required GL entry points", REQUIRED.len());

    Ok(())
}

/// `GL_VERSION` of the current context, if the driver reports one.
pub fn version_string() -> Option<String> {
    unsafe {
        let ptr = gl::GetString(gl::VERSION);
        if ptr.is_null() {
            return None;
        }

        Some(
            CStr::from_ptr(ptr as *const c_char)
                .to_string_lossy()
                .into_owned(),
        )
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("OpenGL functions could not be loaded: {}", .0.join(", "))]
    MissingFunctions(Vec<&'static str>),
}
