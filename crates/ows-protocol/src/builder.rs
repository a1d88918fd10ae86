//! OWS link generation for catalogue records.
//!
//! Given a record's extent and CRS and an editor-supplied endpoint, builds
//! the GetMap/GetFeature URL stored in the record's links together with a
//! schema describing it.

use std::sync::Arc;

use ows_common::{
    BoundingBox, CrsCode, LinkSchema, OwsError, OwsResult, Record, ServiceLink, TileGrid,
};
use projection::Reprojector;
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::params::RequestParams;
use crate::service::{normalize_version, ServiceType};

/// Preview extent for records without a bounding box: mainland Australia.
pub const DEFAULT_PREVIEW_BBOX: BoundingBox = BoundingBox {
    min_x: 108.0,
    min_y: -45.0,
    max_x: 155.0,
    max_y: -10.0,
};

/// CRS of [`DEFAULT_PREVIEW_BBOX`] (GDA94).
pub const DEFAULT_PREVIEW_CRS: CrsCode = CrsCode::EPSG_4283;

/// Image format requested by map links.
pub const PREVIEW_FORMAT: &str = "image/png";

/// Size of GeoWebCache preview images.
pub const GWC_TILE_SIZE: u32 = 1024;

/// WMS image size when the record extent gives none.
pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Feature cap for WFS links to GeoServer.
pub const GEOSERVER_FEATURE_LIMIT: u32 = 20;

/// Fraction passed to [`BoundingBox::shrunk`] for WFS links.
pub const WFS_BBOX_PERCENT: f64 = 0.1;

/// Everything needed to build one link.
#[derive(Debug, Clone)]
pub struct LinkRequest {
    pub identifier: String,
    /// Extent in `crs`, if the record has one
    pub bbox: Option<BoundingBox>,
    pub crs: CrsCode,
    pub endpoint: String,
    pub service_type: ServiceType,
    /// Version as declared; normalized while building
    pub version: String,
}

impl LinkRequest {
    /// Request for `record`, parsing the service type first so an unknown type fails before anything else.
    pub fn for_record(
        record: &Record,
        endpoint: &str,
        service_type: &str,
        service_version: &str,
    ) -> OwsResult<Self> {
        let service_type: ServiceType = service_type.parse()?;
        Ok(Self {
            identifier: record.identifier.clone(),
            bbox: record.bbox(),
            crs: record.crs()?,
            endpoint: endpoint.to_string(),
            service_type,
            version: service_version.to_string(),
        })
    }
}

/// State shared by the per-service parameter strategies.
struct LinkContext<'a> {
    request: &'a LinkRequest,
    endpoint: &'a Endpoint,
    version: &'a str,
    target_crs: CrsCode,
    /// Record extent in `target_crs`
    bbox: Option<BoundingBox>,
}

/// Builds OWS links. Stateless apart from the shared reprojector.
#[derive(Debug, Clone)]
pub struct OwsLinkBuilder {
    reprojector: Arc<Reprojector>,
}

impl OwsLinkBuilder {
    pub fn new(reprojector: Arc<Reprojector>) -> Self {
        Self { reprojector }
    }

    pub fn reprojector(&self) -> &Reprojector {
        &self.reprojector
    }

    /// Build the link for `record` against `endpoint`.
    ///
    /// The record itself is not modified; see [`Record::store_link`].
    pub fn generate_ows_link(
        &self,
        record: &Record,
        endpoint: &str,
        service_type: &str,
        service_version: &str,
    ) -> OwsResult<ServiceLink> {
        let request = LinkRequest::for_record(record, endpoint, service_type, service_version)?;
        self.build(&request)
    }

    /// Build the link described by `request`.
    pub fn build(&self, request: &LinkRequest) -> OwsResult<ServiceLink> {
        let endpoint = Endpoint::parse(&request.endpoint);
        let version = normalize_version(&request.version);
        let target_crs = resolve_target_crs(&endpoint, request)?;

        let bbox = match request.bbox {
            Some(bbox) => Some(self.reproject(request, request.crs, target_crs, &bbox)?),
            None => None,
        };

        let ctx = LinkContext {
            request,
            endpoint: &endpoint,
            version: &version,
            target_crs,
            bbox,
        };

        let mut schema = LinkSchema {
            protocol: request.service_type.protocol().to_string(),
            linkage: Some(endpoint.clean_url()),
            version: Some(version.clone()),
            crs: Some(target_crs.to_string()),
            ..Default::default()
        };

        let params = match request.service_type {
            ServiceType::Wfs => wfs_params(&ctx),
            ServiceType::Wms => {
                schema.format = Some(PREVIEW_FORMAT.to_string());
                wms_params(&ctx)
            }
            ServiceType::Gwc => {
                schema.format = Some(PREVIEW_FORMAT.to_string());
                schema.width = Some(GWC_TILE_SIZE);
                schema.height = Some(GWC_TILE_SIZE);
                self.gwc_params(&ctx)?
            }
        };

        let url = endpoint.with_params(&params);
        debug!(
            identifier = %request.identifier,
            service = %request.service_type,
            crs = %target_crs,
            url = %url,
            "Generated OWS link"
        );

        Ok(ServiceLink::new(schema, url))
    }

    fn reproject(
        &self,
        request: &LinkRequest,
        from: CrsCode,
        to: CrsCode,
        bbox: &BoundingBox,
    ) -> OwsResult<BoundingBox> {
        self.reprojector
            .transform_bbox(from, to, bbox)
            .map_err(|e| OwsError::Reprojection {
                identifier: request.identifier.clone(),
                from: from.to_string(),
                to: to.to_string(),
                reason: e.to_string(),
            })
    }

    /// GeoWebCache: a WMS GetMap for the grid tile holding the record extent.
    fn gwc_params(&self, ctx: &LinkContext<'_>) -> OwsResult<RequestParams> {
        let grid = TileGrid::for_crs(ctx.target_crs)?;
        let extent = match ctx.bbox {
            Some(bbox) => bbox,
            None => self.reproject(
                ctx.request,
                DEFAULT_PREVIEW_CRS,
                ctx.target_crs,
                &DEFAULT_PREVIEW_BBOX,
            )?,
        };
        let tile = grid.preview_tile(&extent);

        let mut params = map_params(ctx, GWC_TILE_SIZE, GWC_TILE_SIZE);
        params.push("BBOX", tile.to_query_value());
        Ok(params)
    }
}

/// CRS the link is requested in: whatever the endpoint declares, else the record's.
fn resolve_target_crs(endpoint: &Endpoint, request: &LinkRequest) -> OwsResult<CrsCode> {
    match endpoint.first_value(request.service_type.crs_params()) {
        Some(value) => CrsCode::from_wms_string(value).map_err(|_| OwsError::InvalidParameter {
            param: request.service_type.crs_params().join("/"),
            message: format!("'{}' is not an EPSG code", value),
        }),
        None => Ok(request.crs),
    }
}

/// GetMap parameters shared by WMS and GeoWebCache links, without BBOX.
fn map_params(ctx: &LinkContext<'_>, width: u32, height: u32) -> RequestParams {
    let crs_param = if ctx.version == "1.3.0" { "CRS" } else { "SRS" };
    let crs_aliases: &'static [&'static str] = &["SRS", "CRS"];

    let mut params = RequestParams::new();
    params
        .push("SERVICE", "WMS")
        .push("REQUEST", "GetMap")
        .push("VERSION", ctx.version)
        .push("LAYERS", &ctx.request.identifier)
        .push_aliased(crs_param, crs_aliases, ctx.target_crs)
        .push("WIDTH", width)
        .push("HEIGHT", height)
        .push("FORMAT", PREVIEW_FORMAT);
    params
}

/// Image size as the truncated extent, or the default when there is no usable extent.
fn image_size(bbox: Option<&BoundingBox>) -> (u32, u32) {
    match bbox {
        Some(bbox) if bbox.is_finite() => {
            (bbox.width().trunc() as u32, bbox.height().trunc() as u32)
        }
        _ => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
    }
}

fn wms_params(ctx: &LinkContext<'_>) -> RequestParams {
    let (width, height) = image_size(ctx.bbox.as_ref());
    let mut params = map_params(ctx, width, height);
    if let Some(bbox) = &ctx.bbox {
        params.push("BBOX", bbox.to_query_value());
    }
    params
}

fn wfs_params(ctx: &LinkContext<'_>) -> RequestParams {
    let typename: (&'static str, &'static [&'static str]) = if ctx.version == "2.0.0" {
        ("TYPENAMES", &["TYPENAME"])
    } else {
        ("TYPENAME", &["TYPENAMES"])
    };

    let mut params = RequestParams::new();
    params
        .push("SERVICE", "WFS")
        .push("REQUEST", "GetFeature")
        .push("VERSION", ctx.version)
        .push_aliased(typename.0, typename.1, &ctx.request.identifier)
        .push("SRSNAME", ctx.target_crs);

    match (ctx.endpoint.is_geoserver(), ctx.version) {
        (true, "2.0.0") => {
            params.push_aliased("count", &["MAXFEATURES"], GEOSERVER_FEATURE_LIMIT);
        }
        (true, "1.1.0") => {
            params.push_aliased("maxFeatures", &["COUNT"], GEOSERVER_FEATURE_LIMIT);
        }
        _ => {
            if let Some(bbox) = &ctx.bbox {
                // NOTE: shrunk() works from the half extents, not the box center,
                // so this BBOX usually lies away from the record extent.
                let shrunk = bbox.shrunk(WFS_BBOX_PERCENT);
                let value = match ctx.version {
                    "1.1.0" | "2.0.0" => shrunk.to_swapped_query_value(),
                    _ => shrunk.to_query_value(),
                };
                params.push("BBOX", value);
            }
        }
    }

    params
}
