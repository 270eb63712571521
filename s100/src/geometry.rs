// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decoding of GML point, curve and surface properties into coordinates.

use std::fmt::{Display, Formatter};

use log::{trace, warn};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::Error;
use crate::xml::{Element, Lookup, Scope, NS_GML};

/// Coordinate value in the `(latitude, longitude)` order GML uses.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({0}, {1})", self.latitude, self.longitude)
    }
}

/// A decoded geometry ready to be placed on a map.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "geometry", rename_all = "lowercase"))]
pub enum Geometry {
    Point(Coordinate),
    /// An open line with at least two coordinates.
    Curve(Vec<Coordinate>),
    /// A ring with at least three coordinates. The ring is implicitly closed
    /// whether or not the last coordinate repeats the first.
    Surface(Vec<Coordinate>),
}

impl Geometry {
    pub const MIN_CURVE_LEN: usize = 2;
    pub const MIN_SURFACE_LEN: usize = 3;

    pub fn point(coordinate: Coordinate) -> Self {
        Self::Point(coordinate)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] for fewer than two coordinates.
    pub fn curve(coordinates: Vec<Coordinate>) -> Result<Self, Error> {
        check_len("curve", Self::MIN_CURVE_LEN, &coordinates)?;
        Ok(Self::Curve(coordinates))
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] for fewer than three coordinates.
    pub fn surface(coordinates: Vec<Coordinate>) -> Result<Self, Error> {
        check_len("surface", Self::MIN_SURFACE_LEN, &coordinates)?;
        Ok(Self::Surface(coordinates))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Curve(_) => "curve",
            Self::Surface(_) => "surface",
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Self::Point(c) => std::slice::from_ref(c),
            Self::Curve(cs) | Self::Surface(cs) => cs,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_coordinates(self.coordinates())
    }

    /// Returns where a marker for this geometry should be placed.
    ///
    /// That's the point itself or the centre of the bounding box for curves
    /// and surfaces.
    pub fn marker_position(&self) -> Coordinate {
        match self {
            Self::Point(c) => *c,
            Self::Curve(_) | Self::Surface(_) => self.bounds().center(),
        }
    }
}

fn check_len(kind: &'static str, min: usize, coordinates: &[Coordinate]) -> Result<(), Error> {
    if coordinates.len() < min {
        return Err(Error::InvalidGeometry {
            kind,
            min,
            actual: coordinates.len(),
        });
    }

    Ok(())
}

/// Latitude/longitude aligned bounding box.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    fn from_coordinates(coordinates: &[Coordinate]) -> Self {
        let mut south_west = Coordinate::new(f64::INFINITY, f64::INFINITY);
        let mut north_east = Coordinate::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

        for c in coordinates {
            south_west.latitude = south_west.latitude.min(c.latitude);
            south_west.longitude = south_west.longitude.min(c.longitude);
            north_east.latitude = north_east.latitude.max(c.latitude);
            north_east.longitude = north_east.longitude.max(c.longitude);
        }

        Self {
            south_west,
            north_east,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }
}

/// The NAVAREA X boundary as closed ring of `(latitude, longitude)` pairs.
pub const NAVAREA_X: [Coordinate; 13] = [
    Coordinate::new(-60.0, 80.0),
    Coordinate::new(-30.0, 80.0),
    Coordinate::new(-30.0, 95.0),
    Coordinate::new(-12.0, 95.0),
    Coordinate::new(-12.0, 127.0),
    Coordinate::new(-10.0, 127.0),
    Coordinate::new(-10.0, 141.0),
    Coordinate::new(0.0, 141.0),
    Coordinate::new(0.0, 170.0),
    Coordinate::new(-29.0, 170.0),
    Coordinate::new(-45.0, 160.0),
    Coordinate::new(-60.0, 160.0),
    Coordinate::new(-60.0, 80.0),
];

/// Returns the default region assumed for warnings without any geometry.
pub fn navarea_x() -> Geometry {
    Geometry::Surface(NAVAREA_X.to_vec())
}

/// Decodes the text of a `gml:posList` into coordinate pairs.
///
/// # Errors
///
/// Returns [`Error::MalformedGeometry`] if a token is not a number or the
/// number of tokens is odd.
///
/// # Examples
///
/// ```
/// use s100::geometry::{decode_pos_list, Coordinate};
///
/// let coords = decode_pos_list("55.1 12.0\n 55.2 12.5")?;
/// assert_eq!(coords, vec![Coordinate::new(55.1, 12.0), Coordinate::new(55.2, 12.5)]);
/// assert!(decode_pos_list("55.1 12.0 55.2").is_err());
/// # Ok::<(), s100::Error>(())
/// ```
pub fn decode_pos_list(text: &str) -> Result<Vec<Coordinate>, Error> {
    let values = text
        .split_whitespace()
        .map(|token| token.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::MalformedGeometry {
            tokens: text.split_whitespace().count(),
            reason: "token is not a number",
        })?;

    if values.len() % 2 != 0 {
        return Err(Error::MalformedGeometry {
            tokens: values.len(),
            reason: "odd number of tokens",
        });
    }

    Ok(values
        .chunks_exact(2)
        .map(|c| Coordinate::new(c[0], c[1]))
        .collect())
}

/// Decodes the text of a `gml:pos` into its first coordinate pair.
///
/// # Errors
///
/// Fails like [`decode_pos_list`] and additionally if the text is empty.
pub fn decode_pos(text: &str) -> Result<Coordinate, Error> {
    decode_pos_list(text)?
        .first()
        .copied()
        .ok_or(Error::MalformedGeometry {
            tokens: 0,
            reason: "position is empty",
        })
}

/// Decodes a geometry wrapper element by the property element it holds.
///
/// | property          | reads           | yields               |
/// |-------------------|-----------------|----------------------|
/// | `pointProperty`   | first `gml:pos`     | [`Geometry::Point`]   |
/// | `curveProperty`   | first `gml:posList` | [`Geometry::Curve`]   |
/// | `surfaceProperty` | first `gml:posList` | [`Geometry::Surface`] |
///
/// # Errors
///
/// [`Error::UnsupportedGeometryType`] for any other property,
/// [`Error::MissingGeometryData`] if the position element is missing and the
/// errors of [`decode_pos`] and [`decode_pos_list`].
pub fn decode_geometry_element(element: &Element) -> Result<Geometry, Error> {
    let property = element
        .first_child_element()
        .ok_or(Error::MissingGeometryData("geometry property"))?;

    trace!("decoding {} of {}", property.local_name, element.name);

    match property.local_name.as_str() {
        "pointProperty" => {
            let pos = element
                .first(Scope::Namespace(NS_GML), "pos")
                .ok_or(Error::MissingGeometryData("gml:pos"))?;
            Ok(Geometry::point(decode_pos(&pos.text_content())?))
        }
        "curveProperty" => Geometry::curve(pos_list(element)?),
        "surfaceProperty" => Geometry::surface(pos_list(element)?),
        tag => Err(Error::UnsupportedGeometryType(tag.to_string())),
    }
}

fn pos_list(element: &Element) -> Result<Vec<Coordinate>, Error> {
    // TODO: decode curves and rings given as sequences of gml:pos
    let pos_list = element
        .first(Scope::Namespace(NS_GML), "posList")
        .ok_or(Error::MissingGeometryData("gml:posList"))?;
    decode_pos_list(&pos_list.text_content())
}

/// Decodes every `geometry` element within `node` in document order.
///
/// The `scope` selects the namespace of the geometry wrapper elements, which
/// belongs to the product (e.g. S-124). Without any geometry element the
/// [NAVAREA X](navarea_x) surface is returned as only geometry.
///
/// # Errors
///
/// Returns the first error of [`decode_geometry_element`]. No partial result
/// is returned.
pub fn decode_geometries<L: Lookup + ?Sized>(
    node: &L,
    scope: Scope<'_>,
) -> Result<Vec<Geometry>, Error> {
    let mut geometries = Vec::new();

    for element in node.descendants(scope, "geometry") {
        match decode_geometry_element(element) {
            Ok(geometry) => geometries.push(geometry),
            Err(e) => {
                warn!("failed to decode geometry: {e}");
                return Err(e);
            }
        }
    }

    if geometries.is_empty() {
        trace!("no geometry found, falling back to NAVAREA X");
        geometries.push(navarea_x());
    }

    Ok(geometries)
}

/// Returns the arithmetic mean of the coordinates of a surface.
///
/// This is a planar approximation good enough to place a marker but not a
/// geodesic centroid.
///
/// # Errors
///
/// Returns [`Error::InvalidGeometry`] for fewer than three coordinates.
pub fn compute_centroid(coordinates: &[Coordinate]) -> Result<Coordinate, Error> {
    check_len("surface", Geometry::MIN_SURFACE_LEN, coordinates)?;

    let n = coordinates.len() as f64;
    let (lat, lng) = coordinates.iter().fold((0.0, 0.0), |(lat, lng), c| {
        (lat + c.latitude, lng + c.longitude)
    });

    Ok(Coordinate::new(lat / n, lng / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{Document, NS_S124};

    fn geometries(body: &str) -> Result<Vec<Geometry>, Error> {
        let xml = format!(
            r#"<S124:NAVWARNPart xmlns:S124="http://www.iho.int/S124/1.0"
                                 xmlns:S100="http://www.iho.int/s100gml/5.0"
                                 xmlns:gml="http://www.opengis.net/gml/3.2">{body}</S124:NAVWARNPart>"#
        );
        let doc = Document::parse(&xml).unwrap();
        decode_geometries(doc.root(), Scope::Namespace(NS_S124))
    }

    #[test]
    fn pos_list_pairs_in_order() {
        let coords = decode_pos_list(" 1 2 3 4\t5 6 ").unwrap();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(1.0, 2.0),
                Coordinate::new(3.0, 4.0),
                Coordinate::new(5.0, 6.0),
            ]
        );
        assert!(decode_pos_list("").unwrap().is_empty());
    }

    #[test]
    fn pos_list_rejects_odd_and_non_numeric() {
        assert_eq!(
            decode_pos_list("1 2 3"),
            Err(Error::MalformedGeometry {
                tokens: 3,
                reason: "odd number of tokens"
            })
        );
        assert!(matches!(
            decode_pos_list("1 north"),
            Err(Error::MalformedGeometry { tokens: 2, .. })
        ));
    }

    #[test]
    fn pos_returns_first_pair() {
        assert_eq!(decode_pos("54.5 10.25 1 1").unwrap(), Coordinate::new(54.5, 10.25));
        assert!(decode_pos("").is_err());
    }

    #[test]
    fn decode_point_curve_and_surface() {
        let geometries = geometries(
            r#"
            <S124:geometry>
              <S100:pointProperty><S100:Point gml:id="p"><gml:pos>55.0 12.0</gml:pos></S100:Point></S100:pointProperty>
            </S124:geometry>
            <S124:geometry>
              <S100:curveProperty><S100:Curve gml:id="c"><gml:segments><gml:LineStringSegment>
                <gml:posList>55.0 12.0 55.5 12.5</gml:posList>
              </gml:LineStringSegment></gml:segments></S100:Curve></S100:curveProperty>
            </S124:geometry>
            <S124:geometry>
              <S100:surfaceProperty><S100:Polygon gml:id="s"><gml:exterior><gml:LinearRing>
                <gml:posList>0 0 0 2 2 2 2 0 0 0</gml:posList>
              </gml:LinearRing></gml:exterior></S100:Polygon></S100:surfaceProperty>
            </S124:geometry>"#,
        )
        .unwrap();

        assert_eq!(geometries.len(), 3);
        assert_eq!(geometries[0], Geometry::Point(Coordinate::new(55.0, 12.0)));
        assert_eq!(geometries[1].kind(), "curve");
        assert_eq!(geometries[1].coordinates().len(), 2);
        assert_eq!(geometries[2].kind(), "surface");
        assert_eq!(geometries[2].coordinates().len(), 5);
    }

    #[test]
    fn no_geometry_falls_back_to_navarea() {
        let geometries = geometries("<S124:header/>").unwrap();
        assert_eq!(geometries, vec![navarea_x()]);
        assert_eq!(geometries[0].coordinates().len(), 13);
    }

    #[test]
    fn geometry_in_foreign_namespace_is_ignored() {
        let geometries =
            geometries(r#"<x:geometry xmlns:x="urn:x"><x:unknown/></x:geometry>"#).unwrap();
        assert_eq!(geometries, vec![navarea_x()]);
    }

    #[test]
    fn decoding_errors_propagate() {
        let missing = geometries(
            "<S124:geometry><S100:surfaceProperty><S100:Polygon/></S100:surfaceProperty></S124:geometry>",
        );
        assert_eq!(missing, Err(Error::MissingGeometryData("gml:posList")));

        let unsupported = geometries(
            "<S124:geometry><S100:volumeProperty/></S124:geometry>",
        );
        assert_eq!(
            unsupported,
            Err(Error::UnsupportedGeometryType("volumeProperty".to_string()))
        );

        let malformed = geometries(
            r#"<S124:geometry><S100:pointProperty><gml:pos>55.0 12.0</gml:pos></S100:pointProperty></S124:geometry>
               <S124:geometry><S100:curveProperty><gml:posList>1 2 3</gml:posList></S100:curveProperty></S124:geometry>"#,
        );
        assert!(matches!(malformed, Err(Error::MalformedGeometry { .. })));
    }

    #[test]
    fn too_short_shapes_are_invalid() {
        let short = geometries(
            "<S124:geometry><S100:surfaceProperty><gml:posList>1 2 3 4</gml:posList></S100:surfaceProperty></S124:geometry>",
        );
        assert_eq!(
            short,
            Err(Error::InvalidGeometry {
                kind: "surface",
                min: 3,
                actual: 2
            })
        );
        assert!(Geometry::curve(vec![Coordinate::default()]).is_err());
    }

    #[test]
    fn centroid_of_square() {
        let square = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(2.0, 0.0),
        ];
        assert_eq!(compute_centroid(&square).unwrap(), Coordinate::new(1.0, 1.0));
        assert!(matches!(
            compute_centroid(&square[..2]),
            Err(Error::InvalidGeometry { actual: 2, .. })
        ));
    }

    #[test]
    fn marker_position_is_bounds_center() {
        let curve = Geometry::curve(vec![
            Coordinate::new(10.0, 20.0),
            Coordinate::new(11.0, 20.0),
            Coordinate::new(14.0, 24.0),
        ])
        .unwrap();
        assert_eq!(curve.marker_position(), Coordinate::new(12.0, 22.0));

        let point = Geometry::point(Coordinate::new(1.0, 2.0));
        assert_eq!(point.marker_position(), Coordinate::new(1.0, 2.0));
    }
}
