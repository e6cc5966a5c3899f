//! Binary STL
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles N
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! All values are little-endian.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use super::HEADER_SIZE;
use crate::error::{Error, Result};
use crate::model::TriangleMesh;

/// Header plus the triangle count field
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record
pub(crate) const RECORD_SIZE: usize = 50;

/// Byte length a binary STL with `count` triangles must have at least
fn expected_len(count: u32) -> u64 {
    PREAMBLE_SIZE as u64 + RECORD_SIZE as u64 * u64::from(count)
}

/// Whether the buffer is exactly as long as its triangle count field says
pub(super) fn length_matches(bytes: &[u8]) -> bool {
    bytes.len() >= PREAMBLE_SIZE
        && expected_len(LittleEndian::read_u32(&bytes[HEADER_SIZE..PREAMBLE_SIZE]))
            == bytes.len() as u64
}

fn read_vec3(data: &[u8]) -> [f32; 3] {
    [
        LittleEndian::read_f32(&data[0..]),
        LittleEndian::read_f32(&data[4..]),
        LittleEndian::read_f32(&data[8..]),
    ]
}

/// Decode a binary STL buffer
///
/// Reads exactly the declared number of records. Bytes after the last record
/// are ignored.
pub(super) fn parse(bytes: &[u8]) -> Result<TriangleMesh> {
    if bytes.len() < PREAMBLE_SIZE {
        return Err(Error::InvalidHeader(format!(
            "binary STL needs at least {} bytes for header and triangle count, got {}",
            PREAMBLE_SIZE,
            bytes.len()
        )));
    }

    let declared = LittleEndian::read_u32(&bytes[HEADER_SIZE..PREAMBLE_SIZE]);
    let expected = expected_len(declared);
    if (bytes.len() as u64) < expected {
        return Err(Error::Truncated {
            declared,
            expected,
            actual: bytes.len() as u64,
        });
    }

    // Length check above bounds `declared` by the buffer size
    let count = declared as usize;
    trace!(count, "reading binary triangle records");

    let mut mesh = TriangleMesh::with_capacity(count);
    for record in bytes[PREAMBLE_SIZE..]
        .chunks_exact(RECORD_SIZE)
        .take(count)
    {
        let normal = read_vec3(&record[0..12]);
        let corners = [
            read_vec3(&record[12..24]),
            read_vec3(&record[24..36]),
            read_vec3(&record[36..48]),
        ];
        mesh.push_triangle(normal, corners);
    }

    Ok(mesh)
}
