use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let vertices = vertex_count(self.data.len(), &self.attributes)?;
        let stride: usize = self.attributes.iter().map(|a| a.size()).sum();

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (stride * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                offset += attr.size();
                gl::EnableVertexAttribArray(i as u32);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        log::debug!(
            "uploaded geometry: {} vertices, {} attributes, vao {}",
            vertices,
            self.attributes.len(),
            vao
        );

        Ok(Geometry { vao, vbo, vertices })
    }
}

/// Number of whole vertices `len` floats hold for the given interleaved layout.
pub fn vertex_count(len: usize, attributes: &[VertexAttribute]) -> Result<usize, GBError> {
    let stride: usize = attributes.iter().map(|a| a.size()).sum();

    if stride == 0 {
        return Err(GBError::NoAttributes);
    }

    if len % stride != 0 {
        return Err(GBError::InvalidDataLength { len, stride });
    }

    Ok(len / stride)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("Geometry needs at least one vertex attribute")]
    NoAttributes,
    #[error("Invalid data length {len} for vertex stride {stride}")]
    InvalidDataLength { len: usize, stride: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Vec3 => 3,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_interleaved_vertices() {
        let attrs = [VertexAttribute::Vec3, VertexAttribute::Vec3];

        assert_eq!(vertex_count(18, &attrs), Ok(3));
        assert_eq!(vertex_count(0, &attrs), Ok(0));
        assert_eq!(vertex_count(18, &[VertexAttribute::Vec3]), Ok(6));
    }

    #[test]
    fn rejects_partial_vertices() {
        assert_eq!(
            vertex_count(17, &[VertexAttribute::Vec3]),
            Err(GBError::InvalidDataLength { len: 17, stride: 3 })
        );
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!(vertex_count(6, &[]), Err(GBError::NoAttributes));
    }
}
