#![warn(missing_docs)]

//! partgen: parametric mechanical parts.
//!
//! Washers, spacers, flanges, hex bolts, and involute gears described by a
//! [`PartSpec`], turned into a [`SolidRequest`] by the
//! [`ProfileGenerator`], and built by whatever [`GeometryKernel`] the caller
//! passes in. Batches come from CSV and produce a bill of materials.
//!
//! # Example
//!
//! ```
//! use partgen::{build_solid, IrKernel, PartSpec, ProfileGenerator};
//! use partgen::AnnulusSpec;
//!
//! let spec = PartSpec::Washer(AnnulusSpec {
//!     inner_diameter: 8.4,
//!     outer_diameter: 16.0,
//!     thickness: 1.6,
//! });
//! let request = ProfileGenerator::default().generate(&spec).unwrap();
//!
//! let mut kernel = IrKernel::new();
//! let solid = build_solid(&mut kernel, &request).unwrap();
//! kernel.finish_part(solid, "washer_16x8x1", 10).unwrap();
//! assert_eq!(kernel.document().parts.len(), 1);
//! ```

use thiserror::Error;

pub mod batch;
pub mod bom;
pub mod config;
pub mod input;
pub mod ir_kernel;
pub mod kernel;
mod naming;

pub use batch::{run_batch, BatchReport, Skipped};
pub use bom::{write_bom, BomEntry, BOM_COLUMNS};
pub use config::{Config, InputDefaults, OutputConfig};
pub use input::{read_parts, InputRow, PartRecord};
pub use ir_kernel::IrKernel;
pub use kernel::{build_solid, GeometryKernel, KernelError};
pub use naming::part_name;

pub use partgen_ir as ir;
pub use partgen_ir::{Document, SolidRequest};
pub use partgen_profile::{
    AnnulusSpec, BoltSpec, FlangeSpec, GearSpec, PartKind, PartSpec, ProfileConfig, ProfileError,
    ProfileGenerator,
};

/// Errors returned by part generation and batch processing.
#[derive(Error, Debug)]
pub enum PartError {
    /// Dimensions violate a geometric invariant.
    #[error("invalid {part} dimensions: {reason}")]
    InvalidDimensions {
        /// Part kind.
        part: String,
        /// What is wrong, with the offending values.
        reason: String,
    },
    /// Part type tag not recognized.
    #[error("unknown part type: {0:?}")]
    UnknownPartType(String),
    /// The geometry kernel rejected a request.
    #[error("geometry kernel error: {0}")]
    GeometryKernel(#[from] KernelError),
    /// Input is missing something with no sensible default.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// An I/O error occurred during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<ProfileError> for PartError {
    fn from(e: ProfileError) -> Self {
        match e {
            ProfileError::InvalidDimensions { part, reason } => {
                PartError::InvalidDimensions { part, reason }
            }
            ProfileError::UnknownPartType(t) => PartError::UnknownPartType(t),
        }
    }
}

/// Result type for partgen operations.
pub type Result<T> = std::result::Result<T, PartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_errors_convert() {
        let e: PartError = ProfileError::UnknownPartType("grommet".into()).into();
        assert!(matches!(e, PartError::UnknownPartType(ref t) if t == "grommet"));
        assert_eq!(e.to_string(), r#"unknown part type: "grommet""#);

        let e: PartError = partgen_profile::compute_annulus(5.0, 5.0, 1.0)
            .unwrap_err()
            .into();
        assert!(matches!(e, PartError::InvalidDimensions { ref part, .. } if part == "annulus"));
    }
}
