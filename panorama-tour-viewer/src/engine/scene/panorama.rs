use bevy::prelude::*;
use bevy::render::mesh::{Indices, VertexAttributeValues};
use tour_constants::panorama::{SPHERE_RADIUS, SPHERE_SECTORS, SPHERE_STACKS};

/// Textured sphere surrounding the camera for the active scene.
#[derive(Component)]
pub struct PanoramaSphere;

/// UV sphere meant to be seen from the inside.
///
/// Triangle winding is reversed so the interior survives back-face culling,
/// normals point at the centre, and U is mirrored so the equirectangular
/// image reads left-to-right from within.
pub fn panorama_sphere_mesh() -> Mesh {
    let mut mesh = Sphere::new(SPHERE_RADIUS)
        .mesh()
        .uv(SPHERE_SECTORS, SPHERE_STACKS);
    turn_inside_out(&mut mesh);
    mesh
}

fn turn_inside_out(mesh: &mut Mesh) {
    if let Some(VertexAttributeValues::Float32x3(normals)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_NORMAL)
    {
        for normal in normals.iter_mut() {
            *normal = [-normal[0], -normal[1], -normal[2]];
        }
    }

    if let Some(VertexAttributeValues::Float32x2(uvs)) = mesh.attribute_mut(Mesh::ATTRIBUTE_UV_0)
    {
        for uv in uvs.iter_mut() {
            uv[0] = 1.0 - uv[0];
        }
    }

    match mesh.indices_mut() {
        Some(Indices::U32(indices)) => indices.chunks_exact_mut(3).for_each(|tri| tri.swap(1, 2)),
        Some(Indices::U16(indices)) => indices.chunks_exact_mut(3).for_each(|tri| tri.swap(1, 2)),
        None => {}
    }
}

/// Panorama material: lighting must not tint the photograph.
pub fn panorama_material(texture: Handle<Image>) -> StandardMaterial {
    StandardMaterial {
        base_color_texture: Some(texture),
        unlit: true,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_triangle(mesh: &Mesh) -> [usize; 3] {
        let indices: Vec<usize> = mesh.indices().unwrap().iter().take(3).collect();
        [indices[0], indices[1], indices[2]]
    }

    #[test]
    fn sphere_winding_is_reversed() {
        let outward = Sphere::new(SPHERE_RADIUS)
            .mesh()
            .uv(SPHERE_SECTORS, SPHERE_STACKS);
        let inward = panorama_sphere_mesh();

        let [a, b, c] = first_triangle(&outward);
        assert_eq!(first_triangle(&inward), [a, c, b]);
        assert_eq!(
            outward.indices().unwrap().len(),
            inward.indices().unwrap().len()
        );
    }

    #[test]
    fn normals_point_inward() {
        let mesh = panorama_sphere_mesh();
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("sphere has no positions");
        };
        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("sphere has no normals");
        };

        for (position, normal) in positions.iter().zip(normals).step_by(97) {
            let outward = Vec3::from(*position).normalize_or_zero();
            assert!(outward.dot(Vec3::from(*normal)) <= 0.0);
        }
    }
}
