//! Hex-head bolts.

use std::f64::consts::{FRAC_PI_3, FRAC_PI_6};

use partgen_ir::{Extrusion, Point2D, Profile, SolidRequest};
use partgen_math::polar;

use crate::{positive, to_ir, BoltSpec, ProfileError, Result};

/// Regular hexagon for a bolt head: vertex `i` at `i · 60°`, radius
/// `head_width_across_flats / 2`, counter-clockwise from +X.
pub fn compute_hex_bolt_profile(head_width_across_flats: f64) -> Profile {
    let radius = head_width_across_flats / 2.0;
    let vertices = (0..6)
        .map(|i| to_ir(polar(radius, FRAC_PI_3 * i as f64)))
        .collect();
    Profile::polygon(vertices)
}

/// Circle of radius `bolt_diameter / 2` at the origin, concentric with the head.
pub fn compute_shaft_circle(bolt_diameter: f64) -> Profile {
    Profile::circle(Point2D::origin(), bolt_diameter / 2.0)
}

fn validate(spec: &BoltSpec) -> Result<()> {
    let fields = [
        ("bolt diameter", spec.bolt_diameter),
        ("bolt length", spec.bolt_length),
        ("head width across flats", spec.head_width_across_flats),
        ("head height", spec.head_height),
    ];
    for (name, value) in fields {
        if !positive(value) {
            return Err(ProfileError::invalid(
                "bolt",
                format!("{name} must be positive, got {value}"),
            ));
        }
    }
    // Smallest radius of the hexagon: the shaft must stay inside it.
    let inscribed = spec.head_width_across_flats * FRAC_PI_6.cos();
    if spec.bolt_diameter >= inscribed {
        return Err(ProfileError::invalid(
            "bolt",
            format!(
                "bolt diameter {} does not fit inside a {} hex head",
                spec.bolt_diameter, spec.head_width_across_flats
            ),
        ));
    }
    Ok(())
}

/// Bolt request: the shaft extruded `bolt_length` with the hex head,
/// extruded `head_height` from the same sketch plane, fused onto it.
///
/// # Errors
///
/// [`ProfileError::InvalidDimensions`] if any dimension is not positive or
/// the shaft does not fit inside the head.
pub fn compute_bolt(spec: &BoltSpec) -> Result<SolidRequest> {
    validate(spec)?;
    let shaft = Extrusion::new(
        "shaft",
        compute_shaft_circle(spec.bolt_diameter),
        spec.bolt_length,
    );
    let head = Extrusion::new(
        "head",
        compute_hex_bolt_profile(spec.head_width_across_flats),
        spec.head_height,
    );
    Ok(SolidRequest::new(shaft).fuse(head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use partgen_ir::BooleanOp;

    #[test]
    fn test_hex_example() {
        let profile = compute_hex_bolt_profile(17.0);
        let vertices = match profile {
            Profile::Polygon { vertices } => vertices,
            other => panic!("expected polygon, got {other:?}"),
        };
        assert_eq!(vertices.len(), 6);
        for (i, v) in vertices.iter().enumerate() {
            assert_relative_eq!(v.radius(), 8.5, epsilon = 1e-12);
            let expected = (60.0 * i as f64).to_radians();
            assert_relative_eq!(v.x, 8.5 * expected.cos(), epsilon = 1e-12);
            assert_relative_eq!(v.y, 8.5 * expected.sin(), epsilon = 1e-12);
        }
        assert_eq!(vertices[0], Point2D::new(8.5, 0.0));
    }

    #[test]
    fn test_shaft_circle() {
        assert_eq!(
            compute_shaft_circle(10.0),
            Profile::circle(Point2D::origin(), 5.0)
        );
    }

    #[test]
    fn test_bolt_request() {
        let req = compute_bolt(&BoltSpec::default()).unwrap();
        assert_eq!(req.base.name, "shaft");
        assert_eq!(req.base.height, 50.0);
        let head: Vec<_> = req.tools(BooleanOp::Fuse).collect();
        assert_eq!(head.len(), 1);
        assert_eq!(head[0].height, 8.0);
        assert_eq!(head[0].z_offset, 0.0);
        assert_eq!(req.tools(BooleanOp::Cut).count(), 0);
    }

    #[test]
    fn test_bolt_rejects_non_positive() {
        let spec = BoltSpec {
            head_height: 0.0,
            ..BoltSpec::default()
        };
        assert!(compute_bolt(&spec).is_err());
    }

    #[test]
    fn test_bolt_shaft_must_fit_head() {
        let spec = BoltSpec {
            bolt_diameter: 16.0,
            ..BoltSpec::default()
        };
        let err = compute_bolt(&spec).unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }
}
