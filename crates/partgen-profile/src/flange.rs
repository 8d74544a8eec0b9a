//! Flanges: annulus base, raised lip, bore, and bolt circle.

use partgen_ir::{Extrusion, Point2D, SolidRequest};

use crate::annulus::validate_annulus;
use crate::holes::compute_bolt_hole_placements;
use crate::{positive, FlangeSpec, ProfileError, Result};

fn validate(spec: &FlangeSpec) -> Result<()> {
    validate_annulus(
        "flange",
        spec.inner_diameter,
        spec.outer_diameter,
        spec.thickness,
    )?;
    if spec.lip_outer_diameter <= spec.outer_diameter || !spec.lip_outer_diameter.is_finite() {
        return Err(ProfileError::invalid(
            "flange",
            format!(
                "lip outer diameter {} must exceed outer diameter {}",
                spec.lip_outer_diameter, spec.outer_diameter
            ),
        ));
    }
    if !positive(spec.lip_thickness) {
        return Err(ProfileError::invalid(
            "flange",
            format!("lip thickness must be positive, got {}", spec.lip_thickness),
        ));
    }
    if spec.num_holes > 0 {
        if !positive(spec.hole_diameter) {
            return Err(ProfileError::invalid(
                "flange",
                format!(
                    "hole diameter must be positive for {} holes, got {}",
                    spec.num_holes, spec.hole_diameter
                ),
            ));
        }
        if let Some(pcd) = spec.pitch_circle_diameter {
            if pcd < 0.0 || !pcd.is_finite() {
                return Err(ProfileError::invalid(
                    "flange",
                    format!("pitch circle diameter must be finite and not negative, got {pcd}"),
                ));
            }
        }
    }
    Ok(())
}

/// Flange request: base cylinder, lip fused on top of it, then the bore and
/// every bolt hole cut through the full height.
///
/// Bolt hole `i` sits at `i · 360° / num_holes` on the pitch circle. An unset
/// or zero pitch circle uses the mean of inner and outer diameter.
///
/// # Errors
///
/// [`ProfileError::InvalidDimensions`] when the base is not a valid annulus,
/// the lip is not wider than the base, the lip thickness is not positive, or
/// holes are requested with a non-positive diameter.
pub fn compute_flange(spec: &FlangeSpec) -> Result<SolidRequest> {
    validate(spec)?;

    let total = spec.total_height();
    let pcd = spec.effective_pitch_circle_diameter(0.5);

    let base = Extrusion::cylinder(
        "base",
        Point2D::origin(),
        spec.outer_diameter / 2.0,
        spec.thickness,
    );
    let lip = Extrusion::cylinder(
        "lip",
        Point2D::origin(),
        spec.lip_outer_diameter / 2.0,
        spec.lip_thickness,
    )
    .at_z(spec.thickness);

    let mut request = SolidRequest::new(base).fuse(lip);
    if spec.inner_diameter > 0.0 {
        request = request.cut(Extrusion::cylinder(
            "bore",
            Point2D::origin(),
            spec.inner_diameter / 2.0,
            total,
        ));
    }

    let holes = compute_bolt_hole_placements(pcd, spec.num_holes, spec.hole_diameter);
    for (i, hole) in holes.iter().enumerate() {
        request = request.cut(Extrusion::cylinder(
            format!("bolt_hole_{i}"),
            hole.center(),
            hole.radius,
            total,
        ));
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use partgen_ir::{BooleanOp, Profile};

    fn spec() -> FlangeSpec {
        FlangeSpec {
            inner_diameter: 20.0,
            outer_diameter: 60.0,
            thickness: 5.0,
            lip_outer_diameter: 80.0,
            lip_thickness: 3.0,
            hole_diameter: 5.0,
            num_holes: 4,
            pitch_circle_diameter: None,
        }
    }

    fn circle(e: &Extrusion) -> (Point2D, f64) {
        match e.profile {
            Profile::Circle { center, radius } => (center, radius),
            ref other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_flange_layout() {
        let req = compute_flange(&spec()).unwrap();

        assert_eq!(circle(&req.base).1, 30.0);
        assert_eq!(req.base.height, 5.0);

        let fuses: Vec<_> = req.tools(BooleanOp::Fuse).collect();
        assert_eq!(fuses.len(), 1);
        assert_eq!(circle(fuses[0]).1, 40.0);
        assert_eq!(fuses[0].z_offset, 5.0);
        assert_eq!(fuses[0].height, 3.0);

        let cuts: Vec<_> = req.tools(BooleanOp::Cut).collect();
        assert_eq!(cuts.len(), 5);
        assert_eq!(cuts[0].name, "bore");
        assert_eq!(circle(cuts[0]).1, 10.0);
        for cut in &cuts {
            assert_eq!(cut.height, 8.0);
            assert_eq!(cut.z_offset, 0.0);
        }
        assert_eq!(req.height(), 8.0);
    }

    #[test]
    fn test_default_pitch_circle_is_mean_diameter() {
        let req = compute_flange(&spec()).unwrap();
        for hole in req.tools(BooleanOp::Cut).skip(1) {
            let (center, radius) = circle(hole);
            assert_relative_eq!(center.radius(), 20.0, epsilon = 1e-12);
            assert_eq!(radius, 2.5);
        }
    }

    #[test]
    fn test_explicit_pitch_circle() {
        let s = FlangeSpec {
            pitch_circle_diameter: Some(50.0),
            ..spec()
        };
        let req = compute_flange(&s).unwrap();
        let hole = req.tools(BooleanOp::Cut).nth(1).unwrap();
        assert_relative_eq!(circle(hole).0.x, 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_holes() {
        let s = FlangeSpec {
            num_holes: 0,
            hole_diameter: 0.0,
            ..spec()
        };
        let req = compute_flange(&s).unwrap();
        assert_eq!(req.tools(BooleanOp::Cut).count(), 1);
    }

    #[test]
    fn test_lip_must_be_wider() {
        let s = FlangeSpec {
            lip_outer_diameter: 60.0,
            ..spec()
        };
        assert!(matches!(
            compute_flange(&s),
            Err(ProfileError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_lip_thickness_positive() {
        let s = FlangeSpec {
            lip_thickness: 0.0,
            ..spec()
        };
        assert!(compute_flange(&s).is_err());
    }

    #[test]
    fn test_base_invariant_checked() {
        let s = FlangeSpec {
            inner_diameter: 60.0,
            ..spec()
        };
        assert!(compute_flange(&s).is_err());
    }

    #[test]
    fn test_holes_need_diameter() {
        let s = FlangeSpec {
            hole_diameter: 0.0,
            ..spec()
        };
        assert!(compute_flange(&s).is_err());
    }

    #[test]
    fn test_non_finite_pitch_circle_rejected() {
        for pcd in [f64::INFINITY, f64::NAN, -1.0] {
            let s = FlangeSpec {
                pitch_circle_diameter: Some(pcd),
                ..spec()
            };
            assert!(
                matches!(compute_flange(&s), Err(ProfileError::InvalidDimensions { .. })),
                "pcd={pcd}"
            );
        }
    }

    #[test]
    fn test_infinite_lip_rejected() {
        let s = FlangeSpec {
            lip_outer_diameter: f64::INFINITY,
            ..spec()
        };
        assert!(compute_flange(&s).is_err());
    }
}
