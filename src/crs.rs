use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::error::SimError;

// ---------------------------------------------------------------------------
// EPSG registry
// ---------------------------------------------------------------------------

/// Proj definition and whether the CRS is geographic (degrees in, degrees out).
///
/// Only the codes the pipeline actually meets are registered; anything else
/// is a hard error rather than a guessed datum.
fn epsg_definition(code: u32) -> Option<(&'static str, bool)> {
    match code {
        // WGS 84 geographic
        4326 => Some(("+proj=longlat +datum=WGS84 +no_defs", true)),
        // ETRS89-extended / LAEA Europe, metres
        3035 => Some((
            "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 \
             +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
            false,
        )),
        // WGS 84 / UTM zone 33N, metres
        32633 => Some(("+proj=utm +zone=33 +datum=WGS84 +units=m +no_defs", false)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Point transform between two registered CRS
// ---------------------------------------------------------------------------

/// A reusable transform from one EPSG code to another.
///
/// proj4rs works in radians for geographic CRS and metres for projected
/// ones; `apply` hides that so callers pass and receive degrees/metres.
pub struct CrsTransform {
    src: Proj,
    dst: Proj,
    src_geographic: bool,
    dst_geographic: bool,
    identity: bool,
}

impl CrsTransform {
    pub fn new(src_epsg: u32, dst_epsg: u32) -> Result<Self, SimError> {
        let (src_def, src_geographic) =
            epsg_definition(src_epsg).ok_or(SimError::UnknownEpsg(src_epsg))?;
        let (dst_def, dst_geographic) =
            epsg_definition(dst_epsg).ok_or(SimError::UnknownEpsg(dst_epsg))?;

        Ok(CrsTransform {
            src: Proj::from_proj_string(src_def)?,
            dst: Proj::from_proj_string(dst_def)?,
            src_geographic,
            dst_geographic,
            identity: src_epsg == dst_epsg,
        })
    }

    /// Transform a single coordinate pair, x first (longitude or easting).
    pub fn apply(&self, x: f64, y: f64) -> Result<(f64, f64), SimError> {
        if self.identity {
            return Ok((x, y));
        }

        let mut point = if self.src_geographic {
            (x.to_radians(), y.to_radians(), 0.0)
        } else {
            (x, y, 0.0)
        };
        transform(&self.src, &self.dst, &mut point)?;

        if self.dst_geographic {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok((point.0, point.1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            CrsTransform::new(4326, 99999),
            Err(SimError::UnknownEpsg(99999))
        ));
    }

    #[test]
    fn identity_transform_passes_through() {
        let t = CrsTransform::new(4326, 4326).unwrap();
        let (x, y) = t.apply(10.25, 52.5).unwrap();
        assert_eq!((x, y), (10.25, 52.5));
    }

    #[test]
    fn laea_grid_origin_maps_to_false_origin() {
        // The LAEA Europe projection centre (10E, 52N) sits at the false
        // easting/northing by construction.
        let t = CrsTransform::new(4326, 3035).unwrap();
        let (x, y) = t.apply(10.0, 52.0).unwrap();
        assert!((x - 4_321_000.0).abs() < 1.0, "easting off: {x}");
        assert!((y - 3_210_000.0).abs() < 1.0, "northing off: {y}");
    }

    #[test]
    fn roundtrip_is_stable() {
        let fwd = CrsTransform::new(4326, 3035).unwrap();
        let inv = CrsTransform::new(3035, 4326).unwrap();
        let (e, n) = fwd.apply(-3.7, 40.4).unwrap();
        let (lon, lat) = inv.apply(e, n).unwrap();
        assert!((lon - -3.7).abs() < 1e-6);
        assert!((lat - 40.4).abs() < 1e-6);
    }
}
