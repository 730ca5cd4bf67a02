//! Mesh invariant checks

use std::fmt;

use super::builder::DEGENERATE_EPSILON;
use crate::vertex::Vertex;

/// Normal length tolerance
const UNIT_TOLERANCE: f32 = 1e-4;

/// Minimum agreement between a stored normal and its triangle's winding
const WINDING_TOLERANCE: f32 = 1e-3;

/// A violated mesh invariant
#[derive(Clone, Debug, PartialEq)]
pub enum MeshIssue {
    /// Vertex count is not a multiple of 3
    PartialTriangle { vertex_count: usize },
    /// A position, normal or texcoord is NaN or infinite
    NonFinite { vertex: usize },
    /// A normal is not unit length
    NonUnitNormal { vertex: usize, length: f32 },
    /// A triangle's winding disagrees with its stored normal
    WindingMismatch { triangle: usize, alignment: f32 },
}

impl fmt::Display for MeshIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshIssue::PartialTriangle { vertex_count } => {
                write!(f, "{} vertices do not form whole triangles", vertex_count)
            }
            MeshIssue::NonFinite { vertex } => write!(f, "vertex {} has non-finite data", vertex),
            MeshIssue::NonUnitNormal { vertex, length } => {
                write!(f, "vertex {} normal has length {}", vertex, length)
            }
            MeshIssue::WindingMismatch {
                triangle,
                alignment,
            } => write!(
                f,
                "triangle {} winding disagrees with its normal (alignment {:.4})",
                triangle, alignment
            ),
        }
    }
}

pub(super) fn check(vertices: &[Vertex]) -> Vec<MeshIssue> {
    let mut issues = Vec::new();

    if !vertices.len().is_multiple_of(3) {
        issues.push(MeshIssue::PartialTriangle {
            vertex_count: vertices.len(),
        });
    }

    for (index, vertex) in vertices.iter().enumerate() {
        let finite = vertex.position().is_finite()
            && vertex.normal().is_finite()
            && vertex.uv().is_finite();
        if !finite {
            issues.push(MeshIssue::NonFinite { vertex: index });
            continue;
        }

        let length = vertex.normal().length();
        if (length - 1.0).abs() > UNIT_TOLERANCE {
            issues.push(MeshIssue::NonUnitNormal {
                vertex: index,
                length,
            });
        }
    }

    for (triangle, corners) in vertices.chunks_exact(3).enumerate() {
        let [a, b, c] = [corners[0], corners[1], corners[2]].map(|v| v.position());
        let cross = (b - a).cross(c - a);
        // Degenerate triangles carry a fallback normal
        if cross.length_squared() <= DEGENERATE_EPSILON || !cross.is_finite() {
            continue;
        }

        let alignment = cross.normalize().dot(corners[0].normal());
        if alignment < 1.0 - WINDING_TOLERANCE {
            issues.push(MeshIssue::WindingMismatch {
                triangle,
                alignment,
            });
        }
    }

    issues
}
