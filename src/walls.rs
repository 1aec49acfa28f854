use crate::error::SceneError;
use crate::geometry::{Mesh, COPLANAR_DOT};

/// Splits a closed box mesh into its flat faces, one two-triangle mesh per face.
///
/// Each remaining triangle is paired with an edge-sharing neighbor of (nearly) the same
/// normal. A triangle with no such partner means the input is not a box.
pub fn decompose_walls(mesh: Mesh) -> Result<Vec<Mesh>, SceneError> {
    let mut remaining = vec![true; mesh.len()];
    let mut walls = Vec::with_capacity(mesh.len() / 2);
    for index in 0..mesh.len() {
        if !remaining[index] {
            continue;
        }
        let normal = mesh.triangles()[index].normal();
        let neighbor = mesh
            .neighbors(index)
            .filter(|&n| remaining[n])
            .find(|&n| mesh.triangles()[n].normal().dot(&normal) > COPLANAR_DOT)
            .ok_or(SceneError::MalformedBackdrop { triangle: index })?;
        remaining[index] = false;
        remaining[neighbor] = false;
        walls.push(Mesh::new(vec![
            mesh.triangles()[index].clone(),
            mesh.triangles()[neighbor].clone(),
        ]));
    }
    Ok(walls)
}
