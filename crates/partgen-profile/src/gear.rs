//! Involute spur gears.
//!
//! One tooth is built as a closed outline: an involute flank sampled from the
//! base circle out to the tip circle, its mirror across the Y axis, and two
//! straight segments joining the matching ends. The gear request extrudes
//! that outline, patterns it `num_teeth` times about Z, and cuts the bore.

use std::f64::consts::PI;

use partgen_ir::{CircularPattern, Extrusion, Point2D, Profile, Segment, SolidRequest};
use partgen_math::{mirror_y, Point2};

use crate::{
    non_negative, positive, to_ir, GearSpec, ProfileConfig, ProfileError, Result,
    DEFAULT_INVOLUTE_SAMPLES,
};

/// Derived gear dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GearGeometry {
    /// `num_teeth · module / 2`.
    pub pitch_radius: f64,
    /// `pitch_radius · cos(pressure angle)`.
    pub base_radius: f64,
    /// Tip height above the pitch circle (= module).
    pub addendum: f64,
    /// Root depth below the pitch circle (= 1.25 · module).
    pub dedendum: f64,
    /// Tip circle radius.
    pub outer_radius: f64,
    /// Root circle radius.
    pub root_radius: f64,
    /// Circular tooth thickness at the pitch circle, net of backlash.
    pub tooth_thickness: f64,
    /// Involute roll angle at the tip circle.
    pub max_roll_angle: f64,
}

/// Compute [`GearGeometry`] without validating.
pub fn gear_geometry(spec: &GearSpec) -> GearGeometry {
    let pitch_radius = spec.num_teeth as f64 * spec.module / 2.0;
    let base_radius = pitch_radius * spec.pressure_angle_degrees.to_radians().cos();
    let addendum = spec.module;
    let dedendum = 1.25 * spec.module;
    let outer_radius = pitch_radius + addendum;
    GearGeometry {
        pitch_radius,
        base_radius,
        addendum,
        dedendum,
        outer_radius,
        root_radius: pitch_radius - dedendum,
        tooth_thickness: PI * spec.module / 2.0 - spec.backlash,
        max_roll_angle: ((outer_radius / base_radius).powi(2) - 1.0).sqrt(),
    }
}

/// Point on the involute of a circle of `base_radius` at roll angle `t`.
pub fn involute_point(base_radius: f64, t: f64) -> Point2 {
    let (s, c) = t.sin_cos();
    Point2::new(base_radius * (c + t * s), base_radius * (s - t * c))
}

/// Involute from the base circle (`t = 0`) out to roll angle `t_max`,
/// sampled at `steps` equal roll-angle steps (`steps + 1` points).
///
/// Zero steps yields the single base-circle point.
pub fn involute_flank(base_radius: f64, t_max: f64, steps: u32) -> Vec<Point2> {
    if steps == 0 {
        return vec![involute_point(base_radius, 0.0)];
    }
    (0..=steps)
        .map(|i| involute_point(base_radius, t_max * i as f64 / steps as f64))
        .collect()
}

fn validate_tooth(spec: &GearSpec) -> Result<()> {
    if spec.num_teeth < 3 {
        return Err(ProfileError::invalid(
            "gear",
            format!("at least 3 teeth required, got {}", spec.num_teeth),
        ));
    }
    if !positive(spec.module) {
        return Err(ProfileError::invalid(
            "gear",
            format!("module must be positive, got {}", spec.module),
        ));
    }
    let pa = spec.pressure_angle_degrees;
    if !(pa > 0.0 && pa < 45.0) {
        return Err(ProfileError::invalid(
            "gear",
            format!("pressure angle must be between 0° and 45°, got {pa}°"),
        ));
    }
    Ok(())
}

fn validate_gear(spec: &GearSpec) -> Result<GearGeometry> {
    validate_tooth(spec)?;
    if !positive(spec.thickness) {
        return Err(ProfileError::invalid(
            "gear",
            format!("thickness must be positive, got {}", spec.thickness),
        ));
    }
    if !non_negative(spec.bore_diameter) {
        return Err(ProfileError::invalid(
            "gear",
            format!("bore diameter must not be negative, got {}", spec.bore_diameter),
        ));
    }
    if !non_negative(spec.backlash) {
        return Err(ProfileError::invalid(
            "gear",
            format!("backlash must not be negative, got {}", spec.backlash),
        ));
    }
    let geometry = gear_geometry(spec);
    if spec.bore_diameter / 2.0 >= geometry.root_radius {
        return Err(ProfileError::invalid(
            "gear",
            format!(
                "bore diameter {} reaches the root circle (radius {})",
                spec.bore_diameter, geometry.root_radius
            ),
        ));
    }
    if geometry.tooth_thickness <= 0.0 {
        return Err(ProfileError::invalid(
            "gear",
            format!(
                "backlash {} leaves no tooth at module {}",
                spec.backlash, spec.module
            ),
        ));
    }
    Ok(geometry)
}

/// Tooth outline with the default sample count.
///
/// # Errors
///
/// [`ProfileError::InvalidDimensions`] if `num_teeth < 3`, `module <= 0`, or
/// the pressure angle is outside (0°, 45°).
pub fn compute_involute_gear_tooth(spec: &GearSpec) -> Result<Profile> {
    involute_gear_tooth(spec, DEFAULT_INVOLUTE_SAMPLES)
}

/// Tooth outline sampled at `steps` roll-angle steps per flank.
///
/// Segments, in order: the involute flank from the base circle to the tip,
/// a line to the tip of the mirrored flank, the mirrored flank back down to
/// the base circle, and a line closing the outline.
pub fn involute_gear_tooth(spec: &GearSpec, steps: u32) -> Result<Profile> {
    validate_tooth(spec)?;
    if steps == 0 {
        return Err(ProfileError::invalid(
            "gear",
            "involute needs at least one sample step",
        ));
    }
    let g = gear_geometry(spec);

    let flank = involute_flank(g.base_radius, g.max_roll_angle, steps);
    let primary: Vec<Point2D> = flank.iter().copied().map(to_ir).collect();
    let mirrored: Vec<Point2D> = flank.iter().map(|p| to_ir(mirror_y(p))).rev().collect();

    // `steps >= 1`, so `flank` has at least two points.
    let (first, last) = (primary[0], primary[primary.len() - 1]);
    let (mirror_tip, mirror_base) = (mirrored[0], mirrored[mirrored.len() - 1]);

    Ok(Profile::Path {
        segments: vec![
            Segment::Spline { points: primary },
            Segment::Line {
                start: last,
                end: mirror_tip,
            },
            Segment::Spline { points: mirrored },
            Segment::Line {
                start: mirror_base,
                end: first,
            },
        ],
    })
}

/// Gear request with default configuration.
pub fn compute_gear(spec: &GearSpec) -> Result<SolidRequest> {
    compute_gear_with(spec, &ProfileConfig::default())
}

/// Gear request: one tooth extruded `thickness`, patterned `num_teeth`
/// times over a full turn, with the bore cut through.
///
/// The bore is cut `gear_bore_clearance` taller than the gear. A zero bore
/// diameter skips the cut.
///
/// # Errors
///
/// [`ProfileError::InvalidDimensions`] for any tooth error, a non-positive
/// thickness, negative bore or backlash, a bore reaching the root circle, or
/// backlash consuming the whole tooth, or an invalid `config` (see
/// [`ProfileConfig::validate`]).
pub fn compute_gear_with(spec: &GearSpec, config: &ProfileConfig) -> Result<SolidRequest> {
    config.validate()?;
    validate_gear(spec)?;
    let tooth = involute_gear_tooth(spec, config.involute_samples)?;

    let mut request = SolidRequest::new(Extrusion::new("tooth", tooth, spec.thickness))
        .with_pattern(CircularPattern::full_turn(spec.num_teeth));
    if spec.bore_diameter > 0.0 {
        request = request.cut(Extrusion::cylinder(
            "bore",
            Point2D::origin(),
            spec.bore_diameter / 2.0,
            spec.thickness + config.gear_bore_clearance,
        ));
    }
    Ok(request)
}
