//! Shared fixtures for integration tests
//!
//! Encoders here are written independently of `stl_quote::writer` so that
//! decoder tests do not depend on the code they are checking against.

#![allow(dead_code)]

/// Corners of an axis-aligned cube from the origin to `size` on every axis
pub fn cube_corners(size: f32) -> [[f32; 3]; 8] {
    [
        [0.0, 0.0, 0.0],
        [size, 0.0, 0.0],
        [size, size, 0.0],
        [0.0, size, 0.0],
        [0.0, 0.0, size],
        [size, 0.0, size],
        [size, size, size],
        [0.0, size, size],
    ]
}

/// Cube faces as corner indices, counter-clockwise seen from outside
pub const CUBE_FACES: [[usize; 3]; 12] = [
    // Bottom face (z=0)
    [0, 2, 1],
    [0, 3, 2],
    // Top face (z=size)
    [4, 5, 6],
    [4, 6, 7],
    // Front face (y=0)
    [0, 1, 5],
    [0, 5, 4],
    // Back face (y=size)
    [3, 7, 6],
    [3, 6, 2],
    // Left face (x=0)
    [0, 4, 7],
    [0, 7, 3],
    // Right face (x=size)
    [1, 2, 6],
    [1, 6, 5],
];

/// Index into `CUBE_FACES` of a top-face triangle whose tetrahedron from the
/// origin has volume size³/6
pub const TOP_FACE_TRIANGLE: usize = 2;

/// (normal, corners) for every cube triangle
pub fn cube_triangles(size: f32) -> Vec<([f32; 3], [[f32; 3]; 3])> {
    let p = cube_corners(size);
    let normals: [[f32; 3]; 6] = [
        [0.0, 0.0, -1.0],
        [0.0, 0.0, 1.0],
        [0.0, -1.0, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
    ];
    CUBE_FACES
        .iter()
        .enumerate()
        .map(|(i, &[a, b, c])| (normals[i / 2], [p[a], p[b], p[c]]))
        .collect()
}

/// 10 mm cube: 1000 mm³ = 1 cm³, 600 mm² = 6 cm²
pub fn unit_cube_triangles() -> Vec<([f32; 3], [[f32; 3]; 3])> {
    cube_triangles(10.0)
}

/// Encode triangles as binary STL
pub fn encode_binary(triangles: &[([f32; 3], [[f32; 3]; 3])]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(84 + triangles.len() * 50);
    let mut header = [0u8; 80];
    let label = b"test fixture";
    header[..label.len()].copy_from_slice(label);
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for (normal, corners) in triangles {
        for value in normal.iter().chain(corners.iter().flatten()) {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(&0u16.to_le_bytes());
    }
    bytes
}

/// Encode triangles as ASCII STL
pub fn encode_ascii(name: &str, triangles: &[([f32; 3], [[f32; 3]; 3])]) -> Vec<u8> {
    let mut text = format!("solid {}\n", name);
    for (normal, corners) in triangles {
        text.push_str(&format!(
            "  facet normal {} {} {}\n    outer loop\n",
            normal[0], normal[1], normal[2]
        ));
        for corner in corners {
            text.push_str(&format!(
                "      vertex {} {} {}\n",
                corner[0], corner[1], corner[2]
            ));
        }
        text.push_str("    endloop\n  endfacet\n");
    }
    text.push_str(&format!("endsolid {}\n", name));
    text.into_bytes()
}

/// Reverse the winding of one triangle
pub fn flip(triangle: ([f32; 3], [[f32; 3]; 3])) -> ([f32; 3], [[f32; 3]; 3]) {
    let (normal, [a, b, c]) = triangle;
    (normal, [a, c, b])
}
