use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use nalgebra::{Matrix4, Vector4};

use crate::geometry::{Fp, Mesh, Triangle, Vec3f};

#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing OFF header")]
    MissingHeader,

    #[error("invalid number {token:?}")]
    Parse { token: String },

    #[error("unexpected end of file")]
    UnexpectedEof,

    #[error("vertex index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("non-finite vertex coordinate {0:?}")]
    NonFinite([Fp; 3]),

    #[error("face with only {0} vertices")]
    FaceTooSmall(usize),

    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),
}

/// Reads a triangle mesh, picking the parser from the file extension.
pub fn load_mesh(path: &Path) -> Result<Mesh, MeshError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let mesh = match extension.as_str() {
        "off" => read_off(BufReader::new(File::open(path)?))?,
        "gltf" | "glb" => read_gltf(path)?,
        _ => return Err(MeshError::UnsupportedFormat(path.display().to_string())),
    };
    log::debug!("loaded {} triangles from {}", mesh.len(), path.display());
    Ok(mesh)
}

pub fn is_mesh_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref(),
        Some("off" | "gltf" | "glb")
    )
}

fn finite_vertex(v: Vec3f) -> Result<Vec3f, MeshError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(v)
    } else {
        Err(MeshError::NonFinite([v.x, v.y, v.z]))
    }
}

fn parse_token<T: FromStr>(token: Option<&str>) -> Result<T, MeshError> {
    let token = token.ok_or(MeshError::UnexpectedEof)?;
    token.parse().map_err(|_| MeshError::Parse {
        token: token.to_string(),
    })
}

/// Object File Format: `OFF`, then `vertices faces edges`, then vertex and face lines.
/// Polygons are fan-triangulated; trailing per-face color values are ignored.
pub fn read_off(reader: impl BufRead) -> Result<Mesh, MeshError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default().trim();
        if !content.is_empty() {
            lines.push(content.to_string());
        }
    }
    let mut lines = lines.iter().map(|line| line.split_whitespace());

    let mut header = lines.next().ok_or(MeshError::MissingHeader)?;
    if header.next() != Some("OFF") {
        return Err(MeshError::MissingHeader);
    }
    // counts may share the header line
    let mut counts = header.peekable();
    let mut counts = if counts.peek().is_some() {
        counts.collect::<Vec<_>>().into_iter()
    } else {
        lines
            .next()
            .ok_or(MeshError::UnexpectedEof)?
            .collect::<Vec<_>>()
            .into_iter()
    };
    let num_vertices: usize = parse_token(counts.next())?;
    let num_faces: usize = parse_token(counts.next())?;

    // header counts are untrusted; never reserve more than the lines left
    let mut vertices = Vec::with_capacity(num_vertices.min(lines.len()));
    for _ in 0..num_vertices {
        let mut tokens = lines.next().ok_or(MeshError::UnexpectedEof)?;
        vertices.push(finite_vertex(Vec3f::new(
            parse_token(tokens.next())?,
            parse_token(tokens.next())?,
            parse_token(tokens.next())?,
        ))?);
    }

    let vertex = |index: usize| {
        vertices
            .get(index)
            .copied()
            .ok_or(MeshError::IndexOutOfRange {
                index,
                count: vertices.len(),
            })
    };
    let mut triangles = Vec::with_capacity(num_faces.min(lines.len()));
    for _ in 0..num_faces {
        let mut tokens = lines.next().ok_or(MeshError::UnexpectedEof)?;
        let size: usize = parse_token(tokens.next())?;
        if size < 3 {
            return Err(MeshError::FaceTooSmall(size));
        }
        let face = (0..size)
            .map(|_| parse_token::<usize>(tokens.next()).and_then(vertex))
            .collect::<Result<Vec<_>, _>>()?;
        for i in 1..size - 1 {
            triangles.push(Triangle::new(face[0], face[i], face[i + 1]));
        }
    }
    Ok(Mesh::new(triangles))
}

fn one_extend(v: &[f32; 3]) -> Vector4<Fp> {
    Vector4::new(v[0] as Fp, v[1] as Fp, v[2] as Fp, 1.0)
}

fn pp4_to_r3(v: Vector4<Fp>) -> Vec3f {
    Vec3f::new(v.x / v.w, v.y / v.w, v.z / v.w)
}

/// All triangle primitives of every scene, flattened into world space.
pub fn read_gltf(path: &Path) -> Result<Mesh, MeshError> {
    let (document, buffers, _) = gltf::import(path)?;
    let mut triangles = Vec::new();
    for gltf_scene in document.scenes() {
        for node in gltf_scene.nodes() {
            read_node_triangles(&mut triangles, &buffers, &node, &Matrix4::identity())?;
        }
    }
    Ok(Mesh::new(triangles))
}

fn read_node_triangles(
    triangles: &mut Vec<Triangle>,
    buffers: &[gltf::buffer::Data],
    node: &gltf::Node,
    transformation: &Matrix4<Fp>,
) -> Result<(), MeshError> {
    let local_transformation_slice = node.transform().matrix();
    let local_transformation =
        Matrix4::from_fn(|y, x| local_transformation_slice[x][y] as Fp);
    let m_transformation = transformation * local_transformation;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("skipping non-triangle primitive in node #{}", node.index());
                continue;
            }
            let reader = primitive.reader(|buffer| Some(buffers[buffer.index()].0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions = positions
                .map(|p| finite_vertex(pp4_to_r3(m_transformation * one_extend(&p))))
                .collect::<Result<Vec<_>, _>>()?;
            let indices = match reader.read_indices() {
                Some(indices) => indices.into_u32().collect::<Vec<_>>(),
                None => (0..positions.len() as u32).collect(),
            };
            let vertex = |index: u32| {
                positions
                    .get(index as usize)
                    .copied()
                    .ok_or(MeshError::IndexOutOfRange {
                        index: index as usize,
                        count: positions.len(),
                    })
            };
            for triangle in indices.chunks_exact(3) {
                triangles.push(Triangle::new(
                    vertex(triangle[0])?,
                    vertex(triangle[1])?,
                    vertex(triangle[2])?,
                ));
            }
        }
    }
    for child in node.children() {
        read_node_triangles(triangles, buffers, &child, &m_transformation)?;
    }
    Ok(())
}
