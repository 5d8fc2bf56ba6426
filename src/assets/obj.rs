//! Wavefront OBJ reader
//!
//! Only geometry is read: `v`, `vt`, `vn` and `f`. Faces with more than
//! three corners are split into a triangle fan. Lines that don't parse are
//! skipped.

use std::path::Path;

use tracing::{debug, info};

use super::AssetError;
use crate::rasterizer::{Vec2, Vec3};

/// Zero-based indices of one face corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjIndex {
    pub position: usize,
    pub texture: Option<usize>,
    pub normal: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjFace {
    pub indices: [ObjIndex; 3],
}

#[derive(Debug, Clone, Default)]
pub struct ObjModel {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<ObjFace>,
}

fn parse_floats<const N: usize>(fields: &mut std::str::SplitWhitespace<'_>) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        *slot = fields.next()?.parse().ok()?;
    }
    Some(out)
}

/// One-based OBJ index to zero-based; `0` and garbage are rejected
fn parse_index(s: &str) -> Option<usize> {
    s.parse::<usize>().ok()?.checked_sub(1)
}

/// `p`, `p/t`, `p//n` or `p/t/n`
fn parse_corner(token: &str) -> Option<ObjIndex> {
    let mut parts = token.split('/');
    let position = parse_index(parts.next()?)?;
    let texture = match parts.next() {
        None | Some("") => None,
        Some(t) => Some(parse_index(t)?),
    };
    let normal = match parts.next() {
        None | Some("") => None,
        Some(n) => Some(parse_index(n)?),
    };
    Some(ObjIndex { position, texture, normal })
}

fn parse_face(fields: std::str::SplitWhitespace<'_>) -> Option<Vec<ObjFace>> {
    let corners = fields.map(parse_corner).collect::<Option<Vec<_>>>()?;
    if corners.len() < 3 {
        return None;
    }
    Some(
        (1..corners.len() - 1)
            .map(|i| ObjFace { indices: [corners[0], corners[i], corners[i + 1]] })
            .collect(),
    )
}

/// Parse OBJ text
pub fn parse_obj(source: &str) -> ObjModel {
    let mut model = ObjModel::default();
    let mut skipped = 0usize;

    for line in source.lines() {
        let mut fields = line.split_whitespace();
        let parsed = match fields.next() {
            Some("v") => parse_floats::<3>(&mut fields)
                .map(|[x, y, z]| model.positions.push(Vec3::new(x, y, z))),
            Some("vt") => parse_floats::<2>(&mut fields)
                .map(|[u, v]| model.uvs.push(Vec2::new(u, v))),
            Some("vn") => parse_floats::<3>(&mut fields)
                .map(|[x, y, z]| model.normals.push(Vec3::new(x, y, z))),
            Some("f") => parse_face(fields).map(|faces| model.faces.extend(faces)),
            _ => Some(()),
        };
        if parsed.is_none() {
            skipped += 1;
        }
    }

    if skipped > 0 {
        debug!("skipped {} malformed obj lines", skipped);
    }
    model
}

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<ObjModel, AssetError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    let model = parse_obj(&source);
    info!(
        "Loaded model: {} ({} vertices, {} triangles)",
        path.display(),
        model.positions.len(),
        model.faces.len()
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 -1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_parse_quad_fans() {
        let model = parse_obj(QUAD);
        assert_eq!(model.positions.len(), 4);
        assert_eq!(model.uvs.len(), 4);
        assert_eq!(model.normals, vec![Vec3::new(0.0, 0.0, -1.0)]);
        assert_eq!(model.faces.len(), 2);
        let second = model.faces[1].indices;
        assert_eq!(
            [second[0].position, second[1].position, second[2].position],
            [0, 2, 3]
        );
        assert_eq!(second[2].texture, Some(3));
        assert_eq!(second[2].normal, Some(0));
    }

    #[test]
    fn test_corner_forms() {
        assert_eq!(
            parse_corner("3"),
            Some(ObjIndex { position: 2, texture: None, normal: None })
        );
        assert_eq!(
            parse_corner("3//2"),
            Some(ObjIndex { position: 2, texture: None, normal: Some(1) })
        );
        assert_eq!(
            parse_corner("3/4"),
            Some(ObjIndex { position: 2, texture: Some(3), normal: None })
        );
        assert_eq!(parse_corner("0/1/1"), None);
        assert_eq!(parse_corner("x"), None);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let model = parse_obj("v 1 2\nv 1 2 3\nvt a b\nf 1 2\nf 1 1 1\no name\n");
        assert_eq!(model.positions, vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert!(model.uvs.is_empty());
        assert_eq!(model.faces.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_obj(dir.path().join("missing.obj")),
            Err(AssetError::Io(_))
        ));
    }
}
