use std::io::{self, Write};

use crate::config::RenderConfig;
use crate::geometry::{Fp, Material, Shape3D, Vec3f};
use crate::scene::{SceneComposition, SceneObject};

fn vec_str(v: &Vec3f) -> String {
    format!("{} {} {}", v.x, v.y, v.z)
}

/// Horizontal field of view for the image size in `render`, given the vertical one.
pub fn horizontal_fov(fov_y: Fp, render: &RenderConfig) -> Fp {
    let aspect = render.width.max(1) as Fp / render.height.max(1) as Fp;
    ((fov_y / 2.0).tan() * aspect).atan() * 2.0
}

/// Writes a composed scene in the line-based format read by the renderer: one command per
/// line, one `NEW_PRIMITIVE` block per triangle or light, focus points last.
pub fn write_scene(
    scene: &SceneComposition,
    render: &RenderConfig,
    out: &mut impl Write,
) -> io::Result<()> {
    let camera = &scene.tracer.camera;
    let fov_x = horizontal_fov(camera.fov, render);
    writeln!(out, "DIMENSIONS {} {}", render.width, render.height)?;
    writeln!(out, "BG_COLOR 0 0 0")?;
    writeln!(out, "CAMERA_POSITION {}", vec_str(&camera.position))?;
    writeln!(out, "CAMERA_FORWARD {}", vec_str(&camera.forward()))?;
    writeln!(out, "CAMERA_RIGHT {}", vec_str(&camera.right()))?;
    writeln!(out, "CAMERA_UP {}", vec_str(&camera.up()))?;
    writeln!(out, "CAMERA_FOV_X {}", fov_x)?;
    writeln!(out, "RAY_DEPTH {}", render.ray_depth)?;
    writeln!(out, "SAMPLES {}", render.samples)?;

    for object in &scene.objects {
        match object {
            SceneObject::Surface { mesh, material } => {
                for triangle in mesh.triangles() {
                    writeln!(out, "NEW_PRIMITIVE")?;
                    writeln!(
                        out,
                        "TRIANGLE {} {} {}",
                        vec_str(&triangle.a),
                        vec_str(&triangle.b),
                        vec_str(&triangle.c)
                    )?;
                    writeln!(out, "COLOR {}", vec_str(&material.color))?;
                    match material.material {
                        Material::Diffused => {}
                        Material::Metallic => writeln!(out, "METALLIC")?,
                        Material::Dielectric => {
                            writeln!(out, "DIELECTRIC")?;
                            writeln!(out, "IOR {}", material.ior)?;
                        }
                    }
                }
            }
            SceneObject::Light(light) => {
                writeln!(out, "NEW_PRIMITIVE")?;
                match &light.object3d.shape {
                    Shape3D::Ellipsoid { r } => writeln!(out, "ELLIPSOID {}", vec_str(r))?,
                    Shape3D::Box { s } => writeln!(out, "BOX {}", vec_str(s))?,
                }
                writeln!(out, "POSITION {}", vec_str(&light.object3d.position))?;
                writeln!(out, "COLOR 0 0 0")?;
                writeln!(out, "EMISSION {}", vec_str(&light.emission))?;
            }
        }
    }

    for (point, prob) in scene
        .tracer
        .focus_points
        .iter()
        .zip(&scene.tracer.focus_probs)
    {
        writeln!(
            out,
            "FOCUS_POINT {} {} {}",
            vec_str(&point.center),
            point.radius,
            prob
        )?;
    }
    Ok(())
}
