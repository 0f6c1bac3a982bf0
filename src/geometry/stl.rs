//! STL surface mesh reader.
//!
//! Reads both the ASCII (`solid ... endsolid`) and the binary
//! (80-byte header, u32 facet count, 50-byte records) variants into
//! [`Panel`]s. Facet normals stored in the file are normalised; a zero or
//! non-finite stored normal is rebuilt from the vertex winding.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::geometry::Panel;
use crate::math::Vec3;

const BINARY_HEADER_LEN: usize = 80;
const BINARY_RECORD_LEN: usize = 50;

/// Error type for STL I/O.
#[derive(Debug, Error)]
pub enum StlError {
    /// File could not be read.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed ASCII content.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Binary file shorter than its facet count requires.
    #[error("Truncated binary STL: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The file holds no facets.
    #[error("STL file contains no facets")]
    Empty,
}

/// Reads an STL file and scales every coordinate by `scale`.
pub fn read_stl(path: &Path, scale: f64) -> Result<Vec<Panel>, StlError> {
    let bytes = fs::read(path)?;
    let panels = if is_binary(&bytes) {
        parse_binary_stl(&bytes)?
    } else {
        let text = String::from_utf8_lossy(&bytes);
        parse_ascii_stl(&text)?
    };

    if panels.is_empty() {
        return Err(StlError::Empty);
    }
    log::info!("read {} facets from {}", panels.len(), path.display());

    if scale == 1.0 {
        return Ok(panels);
    }
    Ok(panels
        .into_iter()
        .map(|p| Panel::new(p.p1 * scale, p.p2 * scale, p.p3 * scale, p.normal))
        .collect())
}

fn is_binary(bytes: &[u8]) -> bool {
    if bytes.len() < BINARY_HEADER_LEN + 4 {
        return false;
    }
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    if bytes.len() == BINARY_HEADER_LEN + 4 + count * BINARY_RECORD_LEN {
        return true;
    }
    // Some exporters write "solid" into binary headers, so only trust it when the size disagrees.
    !bytes.trim_ascii_start().starts_with(b"solid")
}

/// Parses binary STL content.
pub fn parse_binary_stl(bytes: &[u8]) -> Result<Vec<Panel>, StlError> {
    let header_end = BINARY_HEADER_LEN + 4;
    if bytes.len() < header_end {
        return Err(StlError::Truncated {
            expected: header_end,
            actual: bytes.len(),
        });
    }
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    let expected = header_end + count * BINARY_RECORD_LEN;
    if bytes.len() < expected {
        return Err(StlError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }

    let read_vec = |offset: usize| -> Vec3 {
        let f = |i: usize| {
            let o = offset + 4 * i;
            f32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]]) as f64
        };
        Vec3::new(f(0), f(1), f(2))
    };

    let panels = (0..count)
        .map(|i| {
            let base = header_end + i * BINARY_RECORD_LEN;
            facet(
                read_vec(base),
                read_vec(base + 12),
                read_vec(base + 24),
                read_vec(base + 36),
            )
        })
        .collect();
    Ok(panels)
}

/// Parses ASCII STL content.
pub fn parse_ascii_stl(text: &str) -> Result<Vec<Panel>, StlError> {
    let mut panels = Vec::new();
    let mut normal = Vec3::zero();
    let mut vertices: Vec<Vec3> = Vec::with_capacity(3);

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut parts = raw.split_whitespace();
        match parts.next() {
            Some("facet") => {
                if parts.next() != Some("normal") {
                    return Err(parse_error(line_no, "expected 'facet normal'"));
                }
                normal = parse_triplet(&mut parts, line_no)?;
                vertices.clear();
            }
            Some("vertex") => {
                if vertices.len() == 3 {
                    return Err(parse_error(line_no, "more than three vertices in facet"));
                }
                vertices.push(parse_triplet(&mut parts, line_no)?);
            }
            Some("endfacet") => {
                if vertices.len() != 3 {
                    return Err(parse_error(
                        line_no,
                        &format!("facet has {} vertices", vertices.len()),
                    ));
                }
                panels.push(facet(normal, vertices[0], vertices[1], vertices[2]));
                vertices.clear();
            }
            _ => {}
        }
    }

    Ok(panels)
}

fn facet(normal: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Panel {
    if normal.is_finite() && normal.magnitude() > 1e-10 {
        Panel::new(p1, p2, p3, normal)
    } else {
        Panel::from_vertices(p1, p2, p3)
    }
}

fn parse_triplet<'a, I>(parts: &mut I, line: usize) -> Result<Vec3, StlError>
where
    I: Iterator<Item = &'a str>,
{
    let mut xyz = [0.0; 3];
    for v in xyz.iter_mut() {
        let token = parts
            .next()
            .ok_or_else(|| parse_error(line, "expected three coordinates"))?;
        *v = token
            .parse()
            .map_err(|_| parse_error(line, &format!("invalid number '{}'", token)))?;
    }
    Ok(Vec3::from_array(xyz))
}

fn parse_error(line: usize, message: &str) -> StlError {
    StlError::ParseError {
        line,
        message: message.to_string(),
    }
}
