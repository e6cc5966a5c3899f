//! ASCII STL
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//! endsolid name
//! ```
//!
//! Only `facet normal` and `vertex` lines carry data. Every other line,
//! including blank ones, is skipped without checking the grammar around it.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::TriangleMesh;

const FACET_NORMAL: &str = "facet normal";
const VERTEX: &str = "vertex";

/// Parse the three floats following a keyword
fn parse_triple<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
    keyword: &str,
) -> Result<[f32; 3]> {
    let mut values = [0.0f32; 3];
    for (i, value) in values.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| Error::missing_tokens(line, keyword, i))?;
        *value = token
            .parse()
            .map_err(|_| Error::parse_error_at_line(line, &format!("{} component", keyword), token))?;
    }
    Ok(values)
}

/// Decode an ASCII STL buffer
pub(super) fn parse(bytes: &[u8]) -> Result<TriangleMesh> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::ParseError(format!("ASCII STL is not valid UTF-8: {}", e)))?;

    let mut mesh = TriangleMesh::new();
    let mut normal = [0.0f32; 3];
    let mut pending = [([0.0f32; 3], [0.0f32; 3]); 3];
    let mut pending_len = 0;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let mut tokens = raw.split_whitespace();

        // Keywords are whole tokens: "vertexes" or "facet normals" are skipped
        match tokens.next() {
            Some("facet") if tokens.next() == Some("normal") => {
                normal = parse_triple(tokens, line_number, FACET_NORMAL)?;
            }
            Some(VERTEX) => {
                let position = parse_triple(tokens, line_number, VERTEX)?;
                pending[pending_len] = (position, normal);
                pending_len += 1;
                if pending_len == 3 {
                    mesh.push_corners(pending);
                    pending_len = 0;
                }
            }
            _ => {}
        }
    }

    if pending_len > 0 {
        debug!(
            dangling = pending_len,
            "dropping vertices that do not complete a triangle"
        );
    }

    Ok(mesh)
}
