//! CSV part lists.
//!
//! One row per part. Recognised columns (header case and surrounding
//! whitespace ignored): `type, id, od, thickness, quantity, lip_od,
//! lip_thickness, hole_dia, num_holes, pcd`. Only `type` is required.
//!
//! A column that is present but holds something unparsable reads as zero,
//! which then fails validation downstream. A column that is absent takes the
//! value from [`InputDefaults`]. A `pcd` of zero means "not given".

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use partgen_profile::{AnnulusSpec, FlangeSpec, PartKind, PartSpec};

use crate::{part_name, InputDefaults, PartError, Result};

/// A part read from input, ready to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct PartRecord {
    /// Output name, see [`part_name`].
    pub name: String,
    /// Dimensions.
    pub spec: PartSpec,
    /// How many to list on the BOM.
    pub quantity: u32,
}

impl PartRecord {
    /// Record named after its dimensions.
    pub fn new(spec: PartSpec, quantity: u32) -> Self {
        Self {
            name: part_name(&spec),
            spec,
            quantity,
        }
    }
}

/// One data row and what became of it.
#[derive(Debug)]
pub struct InputRow {
    /// 1-based line number in the source, header included.
    pub line: u64,
    /// The parsed part, or why the row was unusable.
    pub record: Result<PartRecord>,
}

struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
                .collect(),
        )
    }

    /// `None` when the column is absent; an empty string when the row is
    /// too short to reach it.
    fn get<'r>(&self, row: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.0
            .get(column)
            .map(|&i| row.get(i).unwrap_or_default())
    }

    fn float(&self, row: &StringRecord, column: &str, default: f64) -> f64 {
        self.get(row, column)
            .map_or(default, |s| s.parse().unwrap_or(0.0))
    }

    fn int(&self, row: &StringRecord, column: &str, default: u32) -> u32 {
        self.get(row, column)
            .map_or(default, |s| s.parse().unwrap_or(0))
    }
}

/// Read every row of a CSV part list.
///
/// Rows are returned in file order whether or not they parsed, so callers
/// can report bad rows alongside good ones.
///
/// # Errors
///
/// [`PartError::MalformedInput`] if there is no `type` column, or
/// [`PartError::Csv`] if the header row cannot be read.
pub fn read_parts<R: Read>(reader: R, defaults: &InputDefaults) -> Result<Vec<InputRow>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::new(reader.headers()?);
    if !columns.0.contains_key("type") {
        return Err(PartError::MalformedInput(
            "no `type` column in part list".into(),
        ));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = match result {
            Ok(record) => InputRow {
                line: record.position().map_or(0, |p| p.line()),
                record: parse_row(&columns, &record, defaults),
            },
            Err(e) => InputRow {
                line: e.position().map_or(0, |p| p.line()),
                record: Err(e.into()),
            },
        };
        rows.push(row);
    }
    Ok(rows)
}

fn parse_row(columns: &Columns, row: &StringRecord, defaults: &InputDefaults) -> Result<PartRecord> {
    let kind: PartKind = columns.get(row, "type").unwrap_or_default().parse()?;

    let annulus = AnnulusSpec {
        inner_diameter: columns.float(row, "id", 0.0),
        outer_diameter: columns.float(row, "od", 0.0),
        thickness: columns.float(row, "thickness", 0.0),
    };
    let spec = match kind {
        PartKind::Washer => PartSpec::Washer(annulus),
        PartKind::Spacer => PartSpec::Spacer(annulus),
        PartKind::Flange => {
            let pcd = columns.float(row, "pcd", 0.0);
            PartSpec::Flange(FlangeSpec {
                inner_diameter: annulus.inner_diameter,
                outer_diameter: annulus.outer_diameter,
                thickness: annulus.thickness,
                lip_outer_diameter: columns.float(row, "lip_od", 0.0),
                lip_thickness: columns.float(row, "lip_thickness", 0.0),
                hole_diameter: columns.float(row, "hole_dia", defaults.hole_diameter),
                num_holes: columns.int(row, "num_holes", defaults.num_holes),
                pitch_circle_diameter: (pcd != 0.0).then_some(pcd),
            })
        }
        PartKind::Bolt | PartKind::Gear => {
            return Err(PartError::MalformedInput(format!(
                "{kind} parts are not read from part lists; use `partgen {kind}`"
            )))
        }
    };
    Ok(PartRecord::new(
        spec,
        columns.int(row, "quantity", defaults.quantity),
    ))
}
