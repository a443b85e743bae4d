//! Permissive parser for the line-oriented mesh description.
//!
//! Recognized records:
//!
//! ```text
//! v  x y z            vertex position
//! vt u v              texture coordinate (kept, unused)
//! vn x y z            vertex normal (kept, unused)
//! f  i[/t[/n]] ...    face of arity >= 3, 1-based (negative = relative)
//! ```
//!
//! Everything else (comments, groups, materials, unknown tags) is skipped.
//! Records whose numbers do not parse are dropped; face corners without a
//! texture or normal field simply contribute nothing to that list.

use tracing::debug;
use wobble_types::WobbleResult;

use crate::mesh::{Face, PolygonMesh};

/// Parses a mesh description and validates the result.
///
/// Ragged input is tolerated. The only hard failure is a face that points
/// past the end of the vertex list, which is reported as
/// [`WobbleError::InvalidMesh`](wobble_types::WobbleError::InvalidMesh).
pub fn parse_obj(source: &str) -> WobbleResult<PolygonMesh> {
    let mut mesh = PolygonMesh::default();
    let mut skipped = 0usize;

    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };

        match tag {
            "v" => match parse_floats::<3>(tokens) {
                Some(p) => mesh.positions.push(p),
                None => skipped += 1,
            },
            "vn" => match parse_floats::<3>(tokens) {
                Some(n) => mesh.normals.push(n),
                None => skipped += 1,
            },
            "vt" => match parse_floats::<2>(tokens) {
                Some(t) => mesh.tex_coords.push(t),
                None => skipped += 1,
            },
            "f" => match parse_face(tokens, &mesh) {
                Some(face) => mesh.faces.push(face),
                None => skipped += 1,
            },
            _ => {}
        }
    }

    if skipped > 0 {
        debug!(skipped, "skipped malformed mesh records");
    }

    mesh.validate()?;
    Ok(mesh)
}

impl PolygonMesh {
    /// Parses a mesh description. See [`parse_obj`].
    pub fn from_obj_str(source: &str) -> WobbleResult<Self> {
        parse_obj(source)
    }
}

/// Parses the first `N` tokens as floats. Extra tokens are ignored.
fn parse_floats<'a, const N: usize>(mut tokens: impl Iterator<Item = &'a str>) -> Option<[f32; N]> {
    let mut out = [0.0f32; N];
    for slot in &mut out {
        *slot = tokens.next()?.parse().ok()?;
    }
    Some(out)
}

/// Parses the corners of a face record.
///
/// Corners whose vertex field is missing or unresolvable are dropped.
/// Returns `None` if fewer than three corners survive.
fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>, mesh: &PolygonMesh) -> Option<Face> {
    let mut face = Face::default();

    for token in tokens {
        let mut fields = token.split('/');
        let Some(v) = fields
            .next()
            .and_then(|f| resolve_index(f, mesh.positions.len()))
        else {
            continue;
        };
        face.vertices.push(v);

        if let Some(t) = fields
            .next()
            .and_then(|f| resolve_index(f, mesh.tex_coords.len()))
        {
            face.tex_coords.push(t);
        }
        if let Some(n) = fields
            .next()
            .and_then(|f| resolve_index(f, mesh.normals.len()))
        {
            face.normals.push(n);
        }
    }

    (face.arity() >= 3).then_some(face)
}

/// Converts a 1-based (or negative, relative) index to 0-based.
///
/// `count` is the number of elements defined so far, which is what
/// negative indices are relative to. Index 0 and empty fields are invalid.
fn resolve_index(field: &str, count: usize) -> Option<u32> {
    let raw: i64 = field.parse().ok()?;
    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count as i64 + raw
    } else {
        return None;
    };
    u32::try_from(resolved).ok()
}
