//! STL encoding
//!
//! The inverse of [`crate::parser`]: writes a [`TriangleMesh`] as binary or
//! ASCII STL. The facet normal written for each triangle is the one stored
//! for its first vertex. Triangles stored with a zero normal, as built meshes
//! usually are, get the normal of their winding instead.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::mesh_ops::calculate_face_normal;
use crate::model::TriangleMesh;
use crate::parser::HEADER_SIZE;

/// Header text for binary output; must never contain "solid"
const BINARY_HEADER: &[u8] = b"binary STL written by stl-quote";

/// Stored facet normal, or the winding normal when none was stored
fn output_normal(mesh: &TriangleMesh, index: usize, [a, b, c]: [[f32; 3]; 3]) -> [f32; 3] {
    match mesh.facet_normal(index) {
        Some(normal) if normal != [0.0; 3] => normal,
        _ => calculate_face_normal(a, b, c),
    }
}

/// Write a mesh as binary STL
///
/// # Example
///
/// ```
/// use stl_quote::{parser::parse_stl, writer::write_binary_stl, TriangleMesh};
///
/// let mut mesh = TriangleMesh::new();
/// mesh.push_triangle([0.0, 0.0, 1.0], [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
///
/// let mut bytes = Vec::new();
/// write_binary_stl(&mesh, &mut bytes).unwrap();
/// assert_eq!(bytes.len(), 84 + 50);
/// assert_eq!(parse_stl(&bytes).unwrap(), mesh);
/// ```
pub fn write_binary_stl<W: Write>(mesh: &TriangleMesh, mut writer: W) -> Result<()> {
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        Error::InvalidHeader(format!(
            "{} triangles do not fit the 32-bit count field",
            mesh.triangle_count()
        ))
    })?;

    let mut header = [b' '; HEADER_SIZE];
    header[..BINARY_HEADER.len()].copy_from_slice(BINARY_HEADER);
    writer.write_all(&header)?;
    writer.write_u32::<LittleEndian>(count)?;

    for (index, triangle) in mesh.triangles().enumerate() {
        let normal = output_normal(mesh, index, triangle);
        for value in normal.iter().chain(triangle.iter().flatten()) {
            writer.write_f32::<LittleEndian>(*value)?;
        }
        writer.write_u16::<LittleEndian>(0)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a mesh as ASCII STL under the given solid name
///
/// Coordinates are written in shortest round-trip scientific notation, so
/// parsing the output reproduces the mesh exactly.
pub fn write_ascii_stl<W: Write>(mesh: &TriangleMesh, name: &str, mut writer: W) -> Result<()> {
    writeln!(writer, "solid {}", name)?;
    for (index, triangle) in mesh.triangles().enumerate() {
        let [nx, ny, nz] = output_normal(mesh, index, triangle);
        writeln!(writer, "  facet normal {:e} {:e} {:e}", nx, ny, nz)?;
        writeln!(writer, "    outer loop")?;
        for [x, y, z] in triangle {
            writeln!(writer, "      vertex {:e} {:e} {:e}", x, y, z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;
    writer.flush()?;
    Ok(())
}
