//! Conversion to and from GeoJSON geometries.
//!
//! GeoJSON describes polygons as nested rings: a `Polygon` is an outer ring
//! followed by its holes, and a `MultiPolygon` is a list of those. Our
//! [`Polygon`]s are flat lists of rings with no nesting, so going to GeoJSON we
//! have to work out which rings are inside which.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geom::Point,
    log::BuildLog,
    polygon::{Polygon, Region},
    signed_area, PolyBool, PolySegments,
};

type Ring = Vec<[f64; 2]>;

/// A GeoJSON geometry object, restricted to the polygonal types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoJson {
    /// An outer ring, followed by any number of holes.
    Polygon(Vec<Ring>),
    /// A collection of polygons.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl GeoJson {
    /// Parses a GeoJSON geometry object.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Writes this geometry as a GeoJSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Converts a GeoJSON ring into a region, dropping the repeated closing point.
fn open_ring<L>(pb: &PolyBool<L>, ring: &[[f64; 2]]) -> Region
where
    L: BuildLog,
{
    let mut ret: Region = ring.iter().copied().map(Point::from).collect();
    if let [first, .., last] = ret.as_slice() {
        if pb.epsilon().same_point(*first, *last) {
            ret.pop();
        }
    }
    ret
}

/// Converts a region into a GeoJSON ring with the requested winding, repeating
/// the first point at the end.
fn closed_ring(region: &[Point], ccw: bool) -> Ring {
    let mut ret: Ring = region.iter().map(|&p| p.into()).collect();
    if (signed_area(region) > 0.0) != ccw {
        ret.reverse();
    }
    if let Some(&first) = ret.first() {
        ret.push(first);
    }
    ret
}

impl<L: BuildLog> PolyBool<L> {
    fn geojson_polygon_segments(&mut self, rings: &[Ring]) -> Result<PolySegments> {
        let Some((outer, holes)) = rings.split_first() else {
            return Ok(PolySegments::default());
        };
        let outer = Polygon::new(vec![open_ring(self, outer)]);
        let mut ret = self.segments(&outer)?;
        for hole in holes {
            let hole = Polygon::new(vec![open_ring(self, hole)]);
            let hole = self.segments(&hole)?;
            let combined = self.combine(&ret, &hole)?;
            ret = self.select_difference(&combined);
        }
        Ok(ret)
    }

    /// Converts a GeoJSON geometry into a polygon.
    ///
    /// Every hole is subtracted from its outer ring, and the polygons of a
    /// `MultiPolygon` are unioned together, so the input doesn't need to get
    /// its ring orientations or nesting right.
    pub fn polygon_from_geojson(&mut self, geo: &GeoJson) -> Result<Polygon> {
        let segs = match geo {
            GeoJson::Polygon(rings) => self.geojson_polygon_segments(rings)?,
            GeoJson::MultiPolygon(polys) => {
                let mut ret = PolySegments::default();
                for rings in polys {
                    let poly = self.geojson_polygon_segments(rings)?;
                    let combined = self.combine(&ret, &poly)?;
                    ret = self.select_union(&combined);
                }
                ret
            }
        };
        self.polygon(&segs)
    }

    /// Converts a polygon into a GeoJSON geometry.
    ///
    /// The polygon is cleaned up first, so overlapping regions are fine. Outer
    /// rings in the output wind counter-clockwise and holes wind clockwise.
    pub fn polygon_to_geojson(&mut self, poly: &Polygon) -> Result<GeoJson> {
        if poly.inverted {
            return Err(Error::InvertedExport);
        }
        let segs = self.segments(poly)?;
        let poly = self.polygon(&segs)?;
        let eps = self.epsilon();
        let regions = &poly.regions;

        // The output regions don't cross, so one is inside another exactly when
        // any of its non-vertex points is.
        let is_inside = |inner: &Region, outer: &Region| {
            inner.len() >= 2 && eps.point_in_region(inner[0].midpoint(inner[1]), outer)
        };
        let parents: Vec<Vec<usize>> = (0..regions.len())
            .map(|i| {
                (0..regions.len())
                    .filter(|&j| j != i && is_inside(&regions[i], &regions[j]))
                    .collect()
            })
            .collect();

        // Regions at even depth are outer boundaries. Each hole belongs to the
        // deepest region containing it.
        let mut outers: Vec<(usize, Vec<Ring>)> = Vec::new();
        for (i, region) in regions.iter().enumerate() {
            if parents[i].len() % 2 == 0 {
                outers.push((i, vec![closed_ring(region, true)]));
            }
        }
        for (i, region) in regions.iter().enumerate() {
            let depth = parents[i].len();
            if depth % 2 == 0 {
                continue;
            }
            let parent = parents[i].iter().find(|&&j| parents[j].len() == depth - 1);
            if let Some(entry) = parent.and_then(|&j| outers.iter_mut().find(|(k, _)| *k == j)) {
                entry.1.push(closed_ring(region, false));
            }
        }

        let mut polys: Vec<Vec<Ring>> = outers.into_iter().map(|(_, rings)| rings).collect();
        Ok(match polys.len() {
            0 => GeoJson::Polygon(Vec::new()),
            1 => GeoJson::Polygon(polys.remove(0)),
            _ => GeoJson::MultiPolygon(polys),
        })
    }
}
