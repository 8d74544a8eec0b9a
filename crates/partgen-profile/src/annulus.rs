//! Washers and spacers.

use partgen_ir::{Extrusion, Point2D, SolidRequest};

use crate::{non_negative, positive, ProfileError, Result};

/// Check the annulus invariant: `0 <= id < od`, `thickness > 0`.
pub(crate) fn validate_annulus(
    part: &str,
    inner_diameter: f64,
    outer_diameter: f64,
    thickness: f64,
) -> Result<()> {
    if !positive(outer_diameter) {
        return Err(ProfileError::invalid(
            part,
            format!("outer diameter must be positive, got {outer_diameter}"),
        ));
    }
    if !non_negative(inner_diameter) {
        return Err(ProfileError::invalid(
            part,
            format!("inner diameter must not be negative, got {inner_diameter}"),
        ));
    }
    if inner_diameter >= outer_diameter {
        return Err(ProfileError::invalid(
            part,
            format!(
                "inner diameter {inner_diameter} must be smaller than outer diameter {outer_diameter}"
            ),
        ));
    }
    if !positive(thickness) {
        return Err(ProfileError::invalid(
            part,
            format!("thickness must be positive, got {thickness}"),
        ));
    }
    Ok(())
}

/// A ring: outer cylinder with a coaxial bore cut out.
///
/// A zero inner diameter yields a plain disc with no cut step.
///
/// # Errors
///
/// [`ProfileError::InvalidDimensions`] unless `0 <= inner_diameter <
/// outer_diameter` and `thickness > 0`.
pub fn compute_annulus(
    inner_diameter: f64,
    outer_diameter: f64,
    thickness: f64,
) -> Result<SolidRequest> {
    validate_annulus("annulus", inner_diameter, outer_diameter, thickness)?;

    let body = Extrusion::cylinder("body", Point2D::origin(), outer_diameter / 2.0, thickness);
    let request = SolidRequest::new(body);
    if inner_diameter == 0.0 {
        return Ok(request);
    }
    Ok(request.cut(Extrusion::cylinder(
        "bore",
        Point2D::origin(),
        inner_diameter / 2.0,
        thickness,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use partgen_ir::{BooleanOp, Profile};

    fn radius(e: &Extrusion) -> f64 {
        match e.profile {
            Profile::Circle { radius, .. } => radius,
            ref other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_annulus_example() {
        let req = compute_annulus(20.0, 40.0, 10.0).unwrap();
        assert_eq!(radius(&req.base), 20.0);
        assert_eq!(req.base.height, 10.0);
        assert!(req.pattern.is_none());

        assert_eq!(req.steps.len(), 1);
        assert_eq!(req.steps[0].op, BooleanOp::Cut);
        assert_eq!(radius(&req.steps[0].tool), 10.0);
        assert_eq!(req.steps[0].tool.height, 10.0);
        assert_eq!(req.steps[0].tool.z_offset, req.base.z_offset);
    }

    #[test]
    fn test_solid_disc_has_no_cut() {
        let req = compute_annulus(0.0, 30.0, 2.0).unwrap();
        assert!(req.steps.is_empty());
        assert_eq!(radius(&req.base), 15.0);
    }

    #[test]
    fn test_rejects_equal_diameters() {
        let err = compute_annulus(40.0, 40.0, 10.0).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_rejects_bad_thickness() {
        assert!(compute_annulus(10.0, 20.0, 0.0).is_err());
        assert!(compute_annulus(10.0, 20.0, -1.0).is_err());
        assert!(compute_annulus(10.0, 20.0, f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_negative_and_zero_diameters() {
        assert!(compute_annulus(-1.0, 20.0, 1.0).is_err());
        assert!(compute_annulus(0.0, 0.0, 1.0).is_err());
        assert!(compute_annulus(30.0, 20.0, 1.0).is_err());
    }
}
