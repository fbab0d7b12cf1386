use std::f64::consts::TAU;

use super::CrossSectionProfile;
use crate::error::{ContractViolation, Result};
use crate::math::Point2;

/// Default segment count for circular contours (Circle, Pipe).
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 24;

/// Closed catalog of supported section shape families, each with its own
/// dimension record (mm).
///
/// One exhaustive match builds the [`CrossSectionProfile`], so an
/// unsupported shape is a compile-time exhaustiveness question rather
/// than a runtime string-dispatch failure. All shapes are centered on the
/// section origin, depth along +y, width along +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileKind {
    /// I/H section: two flanges joined by a central web.
    H {
        depth: f64,
        width: f64,
        web_thickness: f64,
        flange_thickness: f64,
    },
    /// Hollow rectangular section with uniform wall thickness.
    Box {
        depth: f64,
        width: f64,
        wall_thickness: f64,
    },
    /// Hollow circular section.
    Pipe {
        outer_diameter: f64,
        wall_thickness: f64,
        segments: usize,
    },
    /// Angle section: vertical leg on the left, horizontal leg at the bottom.
    L { depth: f64, width: f64, thickness: f64 },
    /// Tee section: flange on top, web hanging below.
    T {
        depth: f64,
        width: f64,
        web_thickness: f64,
        flange_thickness: f64,
    },
    /// Channel section: web on the left, flanges opening to the right.
    C {
        depth: f64,
        width: f64,
        web_thickness: f64,
        flange_thickness: f64,
    },
    /// Solid rectangle.
    Rectangle { depth: f64, width: f64 },
    /// Solid circle.
    Circle { diameter: f64, segments: usize },
}

impl ProfileKind {
    /// Builds the cross-section polygon (with holes for hollow families).
    ///
    /// Hollow sections whose wall thickness consumes the full depth or
    /// width degrade to their solid counterpart rather than erroring: the
    /// cavity vanishes, which is a well-defined degenerate value.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::InvalidShapeDimensions`] for
    /// non-positive dimensions or circular segment counts below 3.
    pub fn build(&self) -> Result<CrossSectionProfile> {
        match *self {
            Self::H {
                depth,
                width,
                web_thickness,
                flange_thickness,
            } => {
                require_positive("H", &[depth, width, web_thickness, flange_thickness])?;
                require_fits("H", web_thickness, width)?;
                require_fits("H", 2.0 * flange_thickness, depth)?;
                let (a, d) = (width / 2.0, depth / 2.0);
                let w = web_thickness / 2.0;
                let f = d - flange_thickness;
                CrossSectionProfile::solid(vec![
                    Point2::new(-a, -d),
                    Point2::new(a, -d),
                    Point2::new(a, -f),
                    Point2::new(w, -f),
                    Point2::new(w, f),
                    Point2::new(a, f),
                    Point2::new(a, d),
                    Point2::new(-a, d),
                    Point2::new(-a, f),
                    Point2::new(-w, f),
                    Point2::new(-w, -f),
                    Point2::new(-a, -f),
                ])
            }
            Self::Box {
                depth,
                width,
                wall_thickness,
            } => {
                require_positive("Box", &[depth, width, wall_thickness])?;
                let outer = rectangle(width / 2.0, depth / 2.0);
                let (ia, id) = (width / 2.0 - wall_thickness, depth / 2.0 - wall_thickness);
                if ia <= 0.0 || id <= 0.0 {
                    // Wall consumes the section: degrade to a solid rectangle.
                    CrossSectionProfile::solid(outer)
                } else {
                    CrossSectionProfile::new(outer, vec![rectangle(ia, id)])
                }
            }
            Self::Pipe {
                outer_diameter,
                wall_thickness,
                segments,
            } => {
                require_positive("Pipe", &[outer_diameter, wall_thickness])?;
                require_segments("Pipe", segments)?;
                let outer = circle(outer_diameter / 2.0, segments);
                let inner_radius = outer_diameter / 2.0 - wall_thickness;
                if inner_radius <= 0.0 {
                    CrossSectionProfile::solid(outer)
                } else {
                    CrossSectionProfile::new(outer, vec![circle(inner_radius, segments)])
                }
            }
            Self::L {
                depth,
                width,
                thickness,
            } => {
                require_positive("L", &[depth, width, thickness])?;
                require_fits("L", thickness, width)?;
                require_fits("L", thickness, depth)?;
                let (a, d) = (width / 2.0, depth / 2.0);
                CrossSectionProfile::solid(vec![
                    Point2::new(-a, -d),
                    Point2::new(a, -d),
                    Point2::new(a, -d + thickness),
                    Point2::new(-a + thickness, -d + thickness),
                    Point2::new(-a + thickness, d),
                    Point2::new(-a, d),
                ])
            }
            Self::T {
                depth,
                width,
                web_thickness,
                flange_thickness,
            } => {
                require_positive("T", &[depth, width, web_thickness, flange_thickness])?;
                require_fits("T", web_thickness, width)?;
                require_fits("T", flange_thickness, depth)?;
                let (a, d) = (width / 2.0, depth / 2.0);
                let w = web_thickness / 2.0;
                let f = d - flange_thickness;
                CrossSectionProfile::solid(vec![
                    Point2::new(-w, -d),
                    Point2::new(w, -d),
                    Point2::new(w, f),
                    Point2::new(a, f),
                    Point2::new(a, d),
                    Point2::new(-a, d),
                    Point2::new(-a, f),
                    Point2::new(-w, f),
                ])
            }
            Self::C {
                depth,
                width,
                web_thickness,
                flange_thickness,
            } => {
                require_positive("C", &[depth, width, web_thickness, flange_thickness])?;
                require_fits("C", web_thickness, width)?;
                require_fits("C", 2.0 * flange_thickness, depth)?;
                let (a, d) = (width / 2.0, depth / 2.0);
                let w = -a + web_thickness;
                let f = d - flange_thickness;
                CrossSectionProfile::solid(vec![
                    Point2::new(-a, -d),
                    Point2::new(a, -d),
                    Point2::new(a, -f),
                    Point2::new(w, -f),
                    Point2::new(w, f),
                    Point2::new(a, f),
                    Point2::new(a, d),
                    Point2::new(-a, d),
                ])
            }
            Self::Rectangle { depth, width } => {
                require_positive("Rectangle", &[depth, width])?;
                CrossSectionProfile::solid(rectangle(width / 2.0, depth / 2.0))
            }
            Self::Circle { diameter, segments } => {
                require_positive("Circle", &[diameter])?;
                require_segments("Circle", segments)?;
                CrossSectionProfile::solid(circle(diameter / 2.0, segments))
            }
        }
    }
}

fn rectangle(half_width: f64, half_depth: f64) -> Vec<Point2> {
    vec![
        Point2::new(-half_width, -half_depth),
        Point2::new(half_width, -half_depth),
        Point2::new(half_width, half_depth),
        Point2::new(-half_width, half_depth),
    ]
}

fn circle(radius: f64, segments: usize) -> Vec<Point2> {
    (0..segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * i as f64 / segments as f64;
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn require_positive(shape: &'static str, dims: &[f64]) -> Result<()> {
    for &d in dims {
        if d <= 0.0 {
            return Err(ContractViolation::InvalidShapeDimensions {
                shape,
                detail: format!("dimension {d} must be positive"),
            }
            .into());
        }
    }
    Ok(())
}

fn require_fits(shape: &'static str, part: f64, whole: f64) -> Result<()> {
    if part >= whole {
        return Err(ContractViolation::InvalidShapeDimensions {
            shape,
            detail: format!("thickness {part} does not fit inside {whole}"),
        }
        .into());
    }
    Ok(())
}

fn require_segments(shape: &'static str, segments: usize) -> Result<()> {
    if segments < 3 {
        return Err(ContractViolation::InvalidShapeDimensions {
            shape,
            detail: format!("segment count {segments} must be at least 3"),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon::signed_area;

    #[test]
    fn h_section_outline() {
        let profile = ProfileKind::H {
            depth: 300.0,
            width: 200.0,
            web_thickness: 10.0,
            flange_thickness: 16.0,
        }
        .build()
        .unwrap();
        assert_eq!(profile.outer().len(), 12);
        assert!(profile.holes().is_empty());
        // Area = 2 flanges + web between them.
        let expected = 2.0 * 200.0 * 16.0 + (300.0 - 32.0) * 10.0;
        assert!((signed_area(profile.outer()) - expected).abs() < 1e-9);
    }

    #[test]
    fn box_section_has_hole() {
        let profile = ProfileKind::Box {
            depth: 300.0,
            width: 300.0,
            wall_thickness: 20.0,
        }
        .build()
        .unwrap();
        assert_eq!(profile.outer().len(), 4);
        assert_eq!(profile.holes().len(), 1);
        assert!((signed_area(profile.outer()) - 90_000.0).abs() < 1e-9);
        assert!((signed_area(&profile.holes()[0]) + 260.0 * 260.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_box_wall_degrades_to_solid() {
        let profile = ProfileKind::Box {
            depth: 100.0,
            width: 100.0,
            wall_thickness: 50.0,
        }
        .build()
        .unwrap();
        assert!(profile.holes().is_empty());
    }

    #[test]
    fn pipe_section_segment_counts() {
        let profile = ProfileKind::Pipe {
            outer_diameter: 200.0,
            wall_thickness: 10.0,
            segments: 32,
        }
        .build()
        .unwrap();
        assert_eq!(profile.outer().len(), 32);
        assert_eq!(profile.holes()[0].len(), 32);
    }

    #[test]
    fn solid_families_have_no_holes() {
        let kinds = [
            ProfileKind::L {
                depth: 120.0,
                width: 80.0,
                thickness: 8.0,
            },
            ProfileKind::T {
                depth: 160.0,
                width: 140.0,
                web_thickness: 9.0,
                flange_thickness: 13.0,
            },
            ProfileKind::C {
                depth: 200.0,
                width: 75.0,
                web_thickness: 8.0,
                flange_thickness: 11.0,
            },
            ProfileKind::Rectangle {
                depth: 100.0,
                width: 50.0,
            },
            ProfileKind::Circle {
                diameter: 60.0,
                segments: DEFAULT_CIRCLE_SEGMENTS,
            },
        ];
        for kind in kinds {
            let profile = kind.build().unwrap();
            assert!(profile.holes().is_empty(), "{kind:?}");
            assert!(signed_area(profile.outer()) > 0.0, "{kind:?}");
        }
    }

    #[test]
    fn non_positive_dimension_rejected() {
        let result = ProfileKind::Rectangle {
            depth: -1.0,
            width: 50.0,
        }
        .build();
        assert!(result.is_err());
    }

    #[test]
    fn web_wider_than_flange_rejected() {
        let result = ProfileKind::H {
            depth: 300.0,
            width: 10.0,
            web_thickness: 10.0,
            flange_thickness: 16.0,
        }
        .build();
        assert!(result.is_err());
    }
}
