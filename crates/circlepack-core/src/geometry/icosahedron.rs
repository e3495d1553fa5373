//! Subdivided icosahedron, the source of every anchor set.

use glam::Vec3;

use crate::error::SketchError;
use crate::Result;

/// Golden ratio, the long edge of the icosahedron's three golden rectangles.
const PHI: f32 = 1.618_034;

const CORNERS: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Number of vertices [`icosahedron`] emits for a given detail level.
pub fn vertex_count(detail: u32) -> usize {
    let cols = detail as usize + 1;
    FACES.len() * cols * cols * 3
}

/// Non-indexed vertex buffer of an icosahedron of `radius`, each face split
/// into `(detail + 1)^2` triangles and pushed onto the sphere.
///
/// Shared corners are repeated once per triangle that uses them, exactly
/// like a non-indexed GPU position attribute.
pub fn icosahedron(radius: f32, detail: u32) -> Result<Vec<Vec3>> {
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(SketchError::InvalidGeometry(format!(
            "icosahedron radius must be positive, got {radius}"
        )));
    }

    let mut out = Vec::with_capacity(vertex_count(detail));
    for face in FACES {
        let [a, b, c] = face.map(|i| Vec3::from_array(CORNERS[i]));
        subdivide_face(a, b, c, detail, &mut out);
    }
    for v in out.iter_mut() {
        *v = v.normalize() * radius;
    }
    Ok(out)
}

/// Split triangle `abc` into a lattice and emit its triangles.
fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<Vec3>) {
    let cols = detail as usize + 1;

    // lattice[i][j]: row i walks from edge ab toward c
    let mut lattice: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;
        let row = if rows == 0 {
            vec![aj]
        } else {
            (0..=rows)
                .map(|j| aj.lerp(bj, j as f32 / rows as f32))
                .collect()
        };
        lattice.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.push(lattice[i][k + 1]);
                out.push(lattice[i + 1][k]);
                out.push(lattice[i][k]);
            } else {
                out.push(lattice[i][k + 1]);
                out.push(lattice[i + 1][k + 1]);
                out.push(lattice[i + 1][k]);
            }
        }
    }
}
