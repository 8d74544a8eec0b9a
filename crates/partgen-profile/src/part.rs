//! Part parameter types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ProfileError;

/// The kinds of part the generator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    /// Flat annulus.
    Washer,
    /// Annulus, usually thicker than a washer.
    Spacer,
    /// Annulus with a raised lip and a bolt circle.
    Flange,
    /// Hex-head bolt.
    Bolt,
    /// Involute spur gear.
    Gear,
}

impl PartKind {
    /// Lower-case tag used in input files and part names.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Washer => "washer",
            PartKind::Spacer => "spacer",
            PartKind::Flange => "flange",
            PartKind::Bolt => "bolt",
            PartKind::Gear => "gear",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartKind {
    type Err = ProfileError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "washer" => Ok(PartKind::Washer),
            "spacer" => Ok(PartKind::Spacer),
            "flange" => Ok(PartKind::Flange),
            "bolt" => Ok(PartKind::Bolt),
            "gear" => Ok(PartKind::Gear),
            _ => Err(ProfileError::UnknownPartType(s.trim().to_string())),
        }
    }
}

/// Washer or spacer dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnulusSpec {
    /// Bore diameter. Zero gives a solid disc.
    pub inner_diameter: f64,
    /// Outside diameter.
    pub outer_diameter: f64,
    /// Axial thickness.
    pub thickness: f64,
}

/// Flange dimensions: an annulus base, a lip on top, and a bolt circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlangeSpec {
    /// Bore diameter.
    pub inner_diameter: f64,
    /// Base outside diameter.
    pub outer_diameter: f64,
    /// Base thickness.
    pub thickness: f64,
    /// Lip outside diameter; must exceed the base.
    pub lip_outer_diameter: f64,
    /// Lip thickness.
    pub lip_thickness: f64,
    /// Bolt hole diameter.
    pub hole_diameter: f64,
    /// Number of bolt holes.
    pub num_holes: u32,
    /// Bolt circle diameter. `None` uses the generator default.
    #[serde(default)]
    pub pitch_circle_diameter: Option<f64>,
}

impl FlangeSpec {
    /// The base ring as an annulus.
    pub fn annulus(&self) -> AnnulusSpec {
        AnnulusSpec {
            inner_diameter: self.inner_diameter,
            outer_diameter: self.outer_diameter,
            thickness: self.thickness,
        }
    }

    /// Bolt circle used for generation.
    ///
    /// An unset or zero pitch circle falls back to the point `fraction` of
    /// the way from the inner to the outer diameter.
    pub fn effective_pitch_circle_diameter(&self, fraction: f64) -> f64 {
        match self.pitch_circle_diameter {
            Some(pcd) if pcd != 0.0 => pcd,
            _ => self.inner_diameter + fraction * (self.outer_diameter - self.inner_diameter),
        }
    }

    /// Copy with the pitch circle resolved.
    pub fn with_default_pitch_circle(&self, fraction: f64) -> Self {
        Self {
            pitch_circle_diameter: Some(self.effective_pitch_circle_diameter(fraction)),
            ..*self
        }
    }

    /// Combined height of base and lip.
    pub fn total_height(&self) -> f64 {
        self.thickness + self.lip_thickness
    }
}

/// Hex-head bolt dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltSpec {
    /// Shaft diameter.
    pub bolt_diameter: f64,
    /// Shaft length.
    pub bolt_length: f64,
    /// Head width across flats.
    pub head_width_across_flats: f64,
    /// Head height.
    pub head_height: f64,
}

impl Default for BoltSpec {
    /// An M10 x 50 bolt with a 17 mm head.
    fn default() -> Self {
        Self {
            bolt_diameter: 10.0,
            bolt_length: 50.0,
            head_width_across_flats: 17.0,
            head_height: 8.0,
        }
    }
}

/// Involute spur gear parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GearSpec {
    /// Tooth count.
    pub num_teeth: u32,
    /// Module (pitch diameter / tooth count), in mm.
    pub module: f64,
    /// Pressure angle in degrees.
    pub pressure_angle_degrees: f64,
    /// Face width.
    pub thickness: f64,
    /// Bore diameter; zero for no bore.
    #[serde(default)]
    pub bore_diameter: f64,
    /// Circular backlash at the pitch circle.
    #[serde(default)]
    pub backlash: f64,
}

impl Default for GearSpec {
    /// 20 teeth, module 2, 20° pressure angle, 5 mm thick, 5 mm bore.
    fn default() -> Self {
        Self {
            num_teeth: 20,
            module: 2.0,
            pressure_angle_degrees: 20.0,
            thickness: 5.0,
            bore_diameter: 5.0,
            backlash: 0.05,
        }
    }
}

/// Parameters for one part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PartSpec {
    /// Washer.
    Washer(AnnulusSpec),
    /// Spacer.
    Spacer(AnnulusSpec),
    /// Flange.
    Flange(FlangeSpec),
    /// Hex bolt.
    Bolt(BoltSpec),
    /// Spur gear.
    Gear(GearSpec),
}

impl PartSpec {
    /// Which kind of part this is.
    pub fn kind(&self) -> PartKind {
        match self {
            PartSpec::Washer(_) => PartKind::Washer,
            PartSpec::Spacer(_) => PartKind::Spacer,
            PartSpec::Flange(_) => PartKind::Flange,
            PartSpec::Bolt(_) => PartKind::Bolt,
            PartSpec::Gear(_) => PartKind::Gear,
        }
    }

    /// Human-readable dimension summary for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            PartSpec::Washer(a) | PartSpec::Spacer(a) => format!(
                "ID={}, OD={}, Thickness={}",
                a.inner_diameter, a.outer_diameter, a.thickness
            ),
            PartSpec::Flange(f) => format!(
                "ID={}, OD={}, Thickness={}, Lip OD={}, Lip Thickness={}",
                f.inner_diameter,
                f.outer_diameter,
                f.thickness,
                f.lip_outer_diameter,
                f.lip_thickness
            ),
            PartSpec::Bolt(b) => format!(
                "D={}, L={}, AF={}, H={}",
                b.bolt_diameter, b.bolt_length, b.head_width_across_flats, b.head_height
            ),
            PartSpec::Gear(g) => format!(
                "Z={}, m={}, PA={}°, Thickness={}",
                g.num_teeth, g.module, g.pressure_angle_degrees, g.thickness
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flange() -> FlangeSpec {
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

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(" Flange ".parse::<PartKind>().unwrap(), PartKind::Flange);
        assert_eq!("WASHER".parse::<PartKind>().unwrap(), PartKind::Washer);
        assert!(matches!(
            "grommet".parse::<PartKind>(),
            Err(ProfileError::UnknownPartType(t)) if t == "grommet"
        ));
    }

    #[test]
    fn test_pitch_circle_defaults_to_mean() {
        assert_eq!(flange().effective_pitch_circle_diameter(0.5), 40.0);

        let zero = FlangeSpec {
            pitch_circle_diameter: Some(0.0),
            ..flange()
        };
        assert_eq!(zero.effective_pitch_circle_diameter(0.5), 40.0);

        let explicit = FlangeSpec {
            pitch_circle_diameter: Some(50.0),
            ..flange()
        };
        assert_eq!(explicit.effective_pitch_circle_diameter(0.5), 50.0);
    }

    #[test]
    fn test_part_spec_tagged_json() {
        let spec = PartSpec::Flange(flange());
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains(r#""type":"flange""#));
        let restored: PartSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, restored);
    }

    #[test]
    fn test_gear_json_defaults_optional_fields() {
        let json = r#"{"type":"gear","num_teeth":12,"module":1.5,"pressure_angle_degrees":20,"thickness":4}"#;
        let spec: PartSpec = serde_json::from_str(json).unwrap();
        match spec {
            PartSpec::Gear(g) => {
                assert_eq!(g.bore_diameter, 0.0);
                assert_eq!(g.backlash, 0.0);
            }
            other => panic!("expected gear, got {other:?}"),
        }
    }

    #[test]
    fn test_describe_names_dimensions() {
        let spec = PartSpec::Washer(AnnulusSpec {
            inner_diameter: 8.4,
            outer_diameter: 16.0,
            thickness: 1.6,
        });
        assert_eq!(spec.describe(), "ID=8.4, OD=16, Thickness=1.6");
    }
}
