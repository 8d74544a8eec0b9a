//! Bill of materials.

use std::io::Write;

use partgen_profile::{gear_geometry, PartKind, PartSpec, ProfileConfig};
use serde::Serialize;

use crate::{PartRecord, Result};

/// BOM header row, in column order.
pub const BOM_COLUMNS: [&str; 11] = [
    "Name",
    "Type",
    "ID (mm)",
    "OD (mm)",
    "Thickness (mm)",
    "Lip OD (mm)",
    "Lip Thickness (mm)",
    "Hole Dia (mm)",
    "Num Holes",
    "PCD (mm)",
    "Quantity",
];

/// One BOM line. Flange-only fields are `None` for other parts and are
/// written as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomEntry {
    /// Part name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Part kind.
    #[serde(rename = "Type")]
    pub kind: PartKind,
    /// Inner or bore diameter.
    #[serde(rename = "ID (mm)")]
    pub inner_diameter: f64,
    /// Outer diameter.
    #[serde(rename = "OD (mm)")]
    pub outer_diameter: f64,
    /// Thickness or length.
    #[serde(rename = "Thickness (mm)")]
    pub thickness: f64,
    /// Flange lip outer diameter.
    #[serde(rename = "Lip OD (mm)")]
    pub lip_outer_diameter: Option<f64>,
    /// Flange lip thickness.
    #[serde(rename = "Lip Thickness (mm)")]
    pub lip_thickness: Option<f64>,
    /// Flange bolt hole diameter.
    #[serde(rename = "Hole Dia (mm)")]
    pub hole_diameter: Option<f64>,
    /// Flange bolt hole count.
    #[serde(rename = "Num Holes")]
    pub num_holes: Option<u32>,
    /// Flange pitch circle diameter.
    #[serde(rename = "PCD (mm)")]
    pub pitch_circle_diameter: Option<f64>,
    /// Quantity.
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

impl BomEntry {
    /// BOM line for `record`.
    ///
    /// Flanges list the pitch circle actually used. Bolts list shaft
    /// diameter as OD and shaft length as thickness; gears list bore, tip
    /// diameter and face width.
    pub fn from_record(record: &PartRecord, profile: &ProfileConfig) -> Self {
        let mut entry = Self {
            name: record.name.clone(),
            kind: record.spec.kind(),
            inner_diameter: 0.0,
            outer_diameter: 0.0,
            thickness: 0.0,
            lip_outer_diameter: None,
            lip_thickness: None,
            hole_diameter: None,
            num_holes: None,
            pitch_circle_diameter: None,
            quantity: record.quantity,
        };
        match &record.spec {
            PartSpec::Washer(a) | PartSpec::Spacer(a) => {
                entry.inner_diameter = a.inner_diameter;
                entry.outer_diameter = a.outer_diameter;
                entry.thickness = a.thickness;
            }
            PartSpec::Flange(f) => {
                entry.inner_diameter = f.inner_diameter;
                entry.outer_diameter = f.outer_diameter;
                entry.thickness = f.thickness;
                entry.lip_outer_diameter = Some(f.lip_outer_diameter);
                entry.lip_thickness = Some(f.lip_thickness);
                entry.hole_diameter = Some(f.hole_diameter);
                entry.num_holes = Some(f.num_holes);
                entry.pitch_circle_diameter =
                    Some(f.effective_pitch_circle_diameter(profile.pitch_circle_fraction));
            }
            PartSpec::Bolt(b) => {
                entry.outer_diameter = b.bolt_diameter;
                entry.thickness = b.bolt_length;
            }
            PartSpec::Gear(g) => {
                entry.inner_diameter = g.bore_diameter;
                entry.outer_diameter = 2.0 * gear_geometry(g).outer_radius;
                entry.thickness = g.thickness;
            }
        }
        entry
    }
}

/// Write `entries` as CSV under a [`BOM_COLUMNS`] header.
///
/// The header is written even when there are no entries.
pub fn write_bom<W: Write>(writer: W, entries: &[BomEntry]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(BOM_COLUMNS)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}
