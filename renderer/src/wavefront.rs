//! Wavefront OBJ geometry, read through the `obj` crate's raw parser.
//!
//! Faces may use any of the `p`, `p/t`, `p//n` and `p/t/n` reference forms.
//! Polygons are fan-triangulated into a flat corner list.

use crate::AssetError;
use math::{Vec2, Vec3};
use obj::raw::object::Polygon;
use obj::raw::{parse_obj, RawObj};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One triangle corner, as zero-based indices into the attribute lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjCorner {
    pub position: usize,
    pub tcoord: Option<usize>,
    pub normal: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjData {
    pub positions: Vec<Vec3>,
    pub tcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    /// Three corners per triangle.
    pub corners: Vec<ObjCorner>,
}

impl ObjData {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(BufReader::new(file), path)
    }

    /// `origin` only labels errors.
    pub fn parse<R: BufRead>(input: R, origin: &Path) -> Result<Self, AssetError> {
        let raw = parse_obj(input).map_err(|source| AssetError::ObjParse {
            path: origin.to_path_buf(),
            source,
        })?;

        let data = Self::from_raw(raw).map_err(|message| AssetError::Obj {
            path: origin.to_path_buf(),
            message,
        })?;

        log::debug!(
            "parsed {}: {} positions, {} triangles",
            origin.display(),
            data.positions.len(),
            data.triangle_count()
        );

        Ok(data)
    }

    fn from_raw(raw: RawObj) -> Result<Self, String> {
        let mut data = ObjData {
            positions: raw
                .positions
                .iter()
                .map(|&(x, y, z, _)| Vec3::from_components(x, y, z))
                .collect(),
            tcoords: raw
                .tex_coords
                .iter()
                .map(|&(u, v, _)| Vec2::from_components(u, v))
                .collect(),
            normals: raw
                .normals
                .iter()
                .map(|&(x, y, z)| Vec3::from_components(x, y, z))
                .collect(),
            corners: Vec::new(),
        };

        for polygon in &raw.polygons {
            let references: Vec<(usize, Option<usize>, Option<usize>)> = match polygon {
                Polygon::P(ps) => ps.iter().map(|&p| (p, None, None)).collect(),
                Polygon::PT(pts) => pts.iter().map(|&(p, t)| (p, Some(t), None)).collect(),
                Polygon::PN(pns) => pns.iter().map(|&(p, n)| (p, None, Some(n))).collect(),
                Polygon::PTN(ptns) => ptns
                    .iter()
                    .map(|&(p, t, n)| (p, Some(t), Some(n)))
                    .collect(),
            };

            let corners = references
                .into_iter()
                .map(|(p, t, n)| data.corner(p, t, n))
                .collect::<Result<Vec<_>, _>>()?;

            if corners.len() < 3 {
                return Err(format!("face needs 3 vertices, found {}", corners.len()));
            }

            for i in 1..corners.len() - 1 {
                data.corners
                    .extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
            }
        }

        if data.corners.is_empty() {
            return Err(format!("no faces ({} positions)", data.positions.len()));
        }

        Ok(data)
    }

    pub fn triangle_count(&self) -> usize {
        self.corners.len() / 3
    }

    /// The position of every triangle corner, in draw order.
    pub fn flattened_positions(&self) -> Vec<Vec3> {
        self.corners
            .iter()
            .map(|corner| self.positions[corner.position])
            .collect()
    }

    fn corner(
        &self,
        position: usize,
        tcoord: Option<usize>,
        normal: Option<usize>,
    ) -> Result<ObjCorner, String> {
        check(position, self.positions.len(), "position")?;
        if let Some(t) = tcoord {
            check(t, self.tcoords.len(), "texture coordinate")?;
        }
        if let Some(n) = normal {
            check(n, self.normals.len(), "normal")?;
        }

        Ok(ObjCorner {
            position,
            tcoord,
            normal,
        })
    }
}

fn check(index: usize, defined: usize, what: &str) -> Result<(), String> {
    if index >= defined {
        return Err(format!(
            "{} index {} is out of range ({} defined)",
            what,
            index + 1,
            defined
        ));
    }
    Ok(())
}
