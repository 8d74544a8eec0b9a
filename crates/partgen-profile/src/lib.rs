#![warn(missing_docs)]

//! Profile generation for parametric mechanical parts.
//!
//! Computes sketch outlines, hole placements, and [`SolidRequest`]s for
//! washers, spacers, flanges, hex bolts, and involute spur gears. Nothing in
//! this crate builds a solid: requests are handed to a geometry kernel by the
//! caller.
//!
//! # Example
//!
//! ```
//! use partgen_profile::{compute_annulus, compute_bolt_hole_placements};
//!
//! let washer = compute_annulus(20.0, 40.0, 10.0).unwrap();
//! assert_eq!(washer.steps.len(), 1);
//!
//! let holes: Vec<_> = compute_bolt_hole_placements(30.0, 4, 5.0).into_iter().collect();
//! assert_eq!(holes.len(), 4);
//! ```

mod annulus;
mod bolt;
mod flange;
mod gear;
mod holes;
mod part;

pub use annulus::compute_annulus;
pub use bolt::{compute_bolt, compute_hex_bolt_profile, compute_shaft_circle};
pub use flange::compute_flange;
pub use gear::{
    compute_gear, compute_gear_with, compute_involute_gear_tooth, gear_geometry, involute_flank,
    involute_gear_tooth, involute_point, GearGeometry,
};
pub use holes::{compute_bolt_hole_placements, BoltHoles, HolePlacement, HolePlacements};
pub use part::{AnnulusSpec, BoltSpec, FlangeSpec, GearSpec, PartKind, PartSpec};

pub use partgen_ir::{Point2D, Profile, SolidRequest};

use partgen_math::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Steps taken along each involute flank when no configuration says otherwise.
pub const DEFAULT_INVOLUTE_SAMPLES: u32 = 15;

/// Errors from profile generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// Dimensions violate a geometric invariant.
    #[error("invalid {part} dimensions: {reason}")]
    InvalidDimensions {
        /// Part or shape being generated.
        part: String,
        /// What is wrong, with the offending values.
        reason: String,
    },

    /// Part type tag not recognized.
    #[error("unknown part type: {0:?}")]
    UnknownPartType(String),
}

impl ProfileError {
    fn invalid(part: &str, reason: impl Into<String>) -> Self {
        ProfileError::InvalidDimensions {
            part: part.to_string(),
            reason: reason.into(),
        }
    }

    /// Relabel a dimension error with the part kind that produced it.
    pub fn for_part(self, kind: PartKind) -> Self {
        match self {
            ProfileError::InvalidDimensions { reason, .. } => ProfileError::InvalidDimensions {
                part: kind.to_string(),
                reason,
            },
            other => other,
        }
    }
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Tunable defaults for generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Steps along each involute flank (the flank gets one more point).
    pub involute_samples: u32,
    /// Default pitch circle as a fraction of the way from inner to outer
    /// diameter. 0.5 puts it on the mean diameter.
    pub pitch_circle_fraction: f64,
    /// Extra height of the gear bore cut so it clears both faces.
    pub gear_bore_clearance: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            involute_samples: DEFAULT_INVOLUTE_SAMPLES,
            pitch_circle_fraction: 0.5,
            gear_bore_clearance: 0.1,
        }
    }
}

impl ProfileConfig {
    /// Reject settings that would produce broken geometry.
    ///
    /// # Errors
    ///
    /// [`ProfileError::InvalidDimensions`] if `involute_samples` is zero,
    /// `pitch_circle_fraction` is outside `[0, 1]`, or `gear_bore_clearance`
    /// is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.involute_samples == 0 {
            return Err(ProfileError::invalid(
                "profile config",
                "involute_samples must be at least 1",
            ));
        }
        let fraction = self.pitch_circle_fraction;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ProfileError::invalid(
                "profile config",
                format!("pitch_circle_fraction must be within [0, 1], got {fraction}"),
            ));
        }
        if !non_negative(self.gear_bore_clearance) {
            return Err(ProfileError::invalid(
                "profile config",
                format!(
                    "gear_bore_clearance must not be negative, got {}",
                    self.gear_bore_clearance
                ),
            ));
        }
        Ok(())
    }
}

/// Turns [`PartSpec`]s into [`SolidRequest`]s using a fixed configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProfileGenerator {
    config: ProfileConfig,
}

impl ProfileGenerator {
    /// Generator with the given configuration.
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Validate `spec` and compute its solid request.
    ///
    /// The configuration is checked first; its errors are not relabeled.
    pub fn generate(&self, spec: &PartSpec) -> Result<SolidRequest> {
        self.config.validate()?;
        let result = match spec {
            PartSpec::Washer(a) | PartSpec::Spacer(a) => {
                compute_annulus(a.inner_diameter, a.outer_diameter, a.thickness)
            }
            PartSpec::Flange(f) => {
                compute_flange(&f.with_default_pitch_circle(self.config.pitch_circle_fraction))
            }
            PartSpec::Bolt(b) => compute_bolt(b),
            PartSpec::Gear(g) => compute_gear_with(g, &self.config),
        };
        result.map_err(|e| e.for_part(spec.kind()))
    }
}

/// Convert a math point to the IR point type.
pub(crate) fn to_ir(p: Point2) -> Point2D {
    Point2D::new(p.x, p.y)
}

/// `x > 0` that also rejects NaN.
pub(crate) fn positive(x: f64) -> bool {
    x > 0.0 && x.is_finite()
}

/// `x >= 0` that also rejects NaN.
pub(crate) fn non_negative(x: f64) -> bool {
    x >= 0.0 && x.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use partgen_ir::BooleanOp;

    #[test]
    fn test_generate_relabels_errors() {
        let spec = PartSpec::Spacer(AnnulusSpec {
            inner_diameter: 12.0,
            outer_diameter: 12.0,
            thickness: 3.0,
        });
        let err = ProfileGenerator::default().generate(&spec).unwrap_err();
        match err {
            ProfileError::InvalidDimensions { part, reason } => {
                assert_eq!(part, "spacer");
                assert!(reason.contains("12"), "reason should name the values: {reason}");
            }
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_uses_configured_pitch_circle() {
        let spec = PartSpec::Flange(FlangeSpec {
            inner_diameter: 20.0,
            outer_diameter: 60.0,
            thickness: 5.0,
            lip_outer_diameter: 80.0,
            lip_thickness: 3.0,
            hole_diameter: 4.0,
            num_holes: 1,
            pitch_circle_diameter: None,
        });
        let config = ProfileConfig {
            pitch_circle_fraction: 0.25,
            ..ProfileConfig::default()
        };
        let req = ProfileGenerator::new(config).generate(&spec).unwrap();
        let hole = req
            .tools(BooleanOp::Cut)
            .find(|t| t.name.starts_with("bolt_hole"))
            .expect("one bolt hole");
        match &hole.profile {
            Profile::Circle { center, .. } => {
                // 20 + 0.25 * (60 - 20) = 30 → radius 15
                assert!((center.radius() - 15.0).abs() < 1e-12);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_gear_uses_sample_count() {
        let spec = PartSpec::Gear(GearSpec::default());
        let config = ProfileConfig {
            involute_samples: 4,
            ..ProfileConfig::default()
        };
        let req = ProfileGenerator::new(config).generate(&spec).unwrap();
        match &req.base.profile {
            Profile::Path { segments } => match &segments[0] {
                partgen_ir::Segment::Spline { points } => assert_eq!(points.len(), 5),
                other => panic!("expected spline, got {other:?}"),
            },
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn test_config_partial_toml_style_defaults() {
        let cfg: ProfileConfig = serde_json::from_str(r#"{"involute_samples": 30}"#).unwrap();
        assert_eq!(cfg.involute_samples, 30);
        assert_eq!(cfg.pitch_circle_fraction, 0.5);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ProfileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let bad = [
            ProfileConfig {
                involute_samples: 0,
                ..ProfileConfig::default()
            },
            ProfileConfig {
                pitch_circle_fraction: -0.1,
                ..ProfileConfig::default()
            },
            ProfileConfig {
                pitch_circle_fraction: 1.5,
                ..ProfileConfig::default()
            },
            ProfileConfig {
                pitch_circle_fraction: f64::NAN,
                ..ProfileConfig::default()
            },
            ProfileConfig {
                gear_bore_clearance: -0.1,
                ..ProfileConfig::default()
            },
        ];
        for config in bad {
            assert!(
                matches!(
                    config.validate(),
                    Err(ProfileError::InvalidDimensions { ref part, .. }) if part == "profile config"
                ),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_generate_rejects_bad_config() {
        let generator = ProfileGenerator::new(ProfileConfig {
            involute_samples: 0,
            ..ProfileConfig::default()
        });
        let err = generator
            .generate(&PartSpec::Gear(GearSpec::default()))
            .unwrap_err();
        assert!(
            matches!(err, ProfileError::InvalidDimensions { ref part, .. } if part == "profile config")
        );
    }
}
