use std::path::PathBuf;

use crate::mesh_io::MeshError;

/// Anything that aborts composing a scene. There are no partial scenes.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("failed to load mesh {path}: {source}")]
    MeshLoad {
        path: PathBuf,
        #[source]
        source: MeshError,
    },

    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("mesh has no extent along axis {axis}")]
    DegenerateMesh { axis: usize },

    #[error("mesh has non-finite vertex coordinates")]
    NonFiniteMesh,

    #[error("backdrop triangle {triangle} has no coplanar neighbor")]
    MalformedBackdrop { triangle: usize },

    #[error("no mesh sources to pick objects from")]
    NoModels,

    #[error("camera position and target coincide")]
    DegenerateCamera,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
