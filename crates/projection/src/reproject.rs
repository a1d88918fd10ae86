//! Point and bounding box reprojection between EPSG coordinate systems.

use ows_common::{BoundingBox, CrsCode};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use tracing::debug;

use crate::{CrsOverrides, ProjectionError};

/// A resolved projection plus whether it takes degrees.
struct Resolved {
    proj: Proj,
    geographic: bool,
}

/// Reprojects coordinates between CRS codes.
///
/// Holds only the override table, so one instance can be shared between
/// threads; projections are resolved per call.
#[derive(Debug, Clone, Default)]
pub struct Reprojector {
    overrides: CrsOverrides,
}

impl Reprojector {
    pub fn new(overrides: CrsOverrides) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &CrsOverrides {
        &self.overrides
    }

    /// proj4 definition for `crs`: the override table wins over the EPSG database.
    pub fn definition(&self, crs: CrsCode) -> Result<&str, ProjectionError> {
        if let Some(definition) = self.overrides.get(crs) {
            return Ok(definition);
        }
        let canonical = crs.canonical();
        if let Some(definition) = self.overrides.get(canonical) {
            return Ok(definition);
        }

        u16::try_from(canonical.code())
            .ok()
            .and_then(crs_definitions::from_code)
            .map(|def| def.proj4)
            .ok_or_else(|| ProjectionError::UnknownCrs(crs.to_string()))
    }

    fn resolve(&self, crs: CrsCode) -> Result<Resolved, ProjectionError> {
        let definition = self.definition(crs)?;
        let proj =
            Proj::from_proj_string(definition).map_err(|e| ProjectionError::InvalidDefinition {
                crs: crs.to_string(),
                reason: format!("{e:?}"),
            })?;
        Ok(Resolved {
            proj,
            geographic: is_geographic(definition),
        })
    }

    /// Transform a single `(x, y)` point. Geographic coordinates are in degrees.
    pub fn transform_point(
        &self,
        from: CrsCode,
        to: CrsCode,
        x: f64,
        y: f64,
    ) -> Result<(f64, f64), ProjectionError> {
        if from.canonical() == to.canonical() {
            return Ok((x, y));
        }
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;
        transform_resolved(&source, &target, from, to, x, y)
    }

    /// Transform both corner pairs of `bbox`.
    ///
    /// Only the min and max corners are transformed, matching how catalogue
    /// records have always been reprojected; the result is not the envelope
    /// of the transformed rectangle.
    pub fn transform_bbox(
        &self,
        from: CrsCode,
        to: CrsCode,
        bbox: &BoundingBox,
    ) -> Result<BoundingBox, ProjectionError> {
        if from.canonical() == to.canonical() {
            return Ok(*bbox);
        }
        let source = self.resolve(from)?;
        let target = self.resolve(to)?;

        let corner = |x, y| transform_resolved(&source, &target, from, to, x, y);
        let (min_x, min_y) = corner(bbox.min_x, bbox.min_y)?;
        let (max_x, max_y) = corner(bbox.max_x, bbox.max_y)?;
        let projected = BoundingBox::new(min_x, min_y, max_x, max_y);

        debug!(%from, %to, ?bbox, ?projected, "Reprojected bounding box");
        Ok(projected)
    }
}

/// Geographic definitions take and return angles.
fn is_geographic(definition: &str) -> bool {
    definition
        .split_whitespace()
        .any(|token| token == "+proj=longlat" || token == "+proj=latlong")
}

fn transform_resolved(
    source: &Resolved,
    target: &Resolved,
    from: CrsCode,
    to: CrsCode,
    x: f64,
    y: f64,
) -> Result<(f64, f64), ProjectionError> {
    let failed = |reason: String| ProjectionError::TransformFailed {
        from: from.to_string(),
        to: to.to_string(),
        reason,
    };

    let mut point = if source.geographic {
        (x.to_radians(), y.to_radians(), 0.0)
    } else {
        (x, y, 0.0)
    };

    transform(&source.proj, &target.proj, &mut point).map_err(|e| failed(format!("{e:?}")))?;

    let (out_x, out_y) = if target.geographic {
        (point.0.to_degrees(), point.1.to_degrees())
    } else {
        (point.0, point.1)
    };

    if !out_x.is_finite() || !out_y.is_finite() {
        return Err(failed(format!("({x}, {y}) has no finite image")));
    }
    Ok((out_x, out_y))
}
