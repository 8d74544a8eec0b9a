//! Output names for generated parts.

use partgen_profile::PartSpec;

/// File-friendly name for a part.
///
/// Washers, spacers and flanges are `{type}_{od}x{id}x{thickness}` with each
/// dimension truncated to whole millimetres, so `8.4` becomes `8`.
pub fn part_name(spec: &PartSpec) -> String {
    match spec {
        PartSpec::Washer(a) | PartSpec::Spacer(a) => {
            annulus_name(spec, a.outer_diameter, a.inner_diameter, a.thickness)
        }
        PartSpec::Flange(f) => annulus_name(spec, f.outer_diameter, f.inner_diameter, f.thickness),
        PartSpec::Bolt(b) => format!("bolt_M{}x{}", b.bolt_diameter, b.bolt_length),
        PartSpec::Gear(g) => format!("gear_{}t_m{}", g.num_teeth, g.module),
    }
}

fn annulus_name(spec: &PartSpec, od: f64, id: f64, thickness: f64) -> String {
    format!(
        "{}_{}x{}x{}",
        spec.kind(),
        od as i64,
        id as i64,
        thickness as i64
    )
}
