//! The seam between profile generation and solid modeling.

use partgen_ir::{BooleanOp, CircularPattern, Extrusion, SolidRequest};
use thiserror::Error;

/// Errors a geometry kernel can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// A profile cannot bound a face (zero area, open, non-finite, ...).
    #[error("degenerate profile for {body}: {reason}")]
    DegenerateProfile {
        /// Body name from the request.
        body: String,
        /// What is wrong with the outline.
        reason: String,
    },
    /// Extrusion distance is zero, negative, or not finite.
    #[error("invalid extrusion height {height} for {body}")]
    InvalidHeight {
        /// Body name from the request.
        body: String,
        /// Offending height.
        height: f64,
    },
    /// Pattern count or angle out of range.
    #[error("invalid circular pattern: {0}")]
    InvalidPattern(String),
    /// A solid handle does not belong to this kernel.
    #[error("unknown solid {0}")]
    UnknownSolid(String),
    /// Anything else the kernel refuses to do.
    #[error("kernel operation failed: {0}")]
    OperationFailed(String),
}

/// A solid-modeling backend.
///
/// Implementations own their solids; callers only hold handles. Methods take
/// `&mut self` because most CAD kernels must be driven from one thread.
pub trait GeometryKernel {
    /// Opaque handle to a solid in this kernel.
    type Solid: Clone;

    /// Extrude a profile along +Z.
    fn extrude(&mut self, body: &Extrusion) -> Result<Self::Solid, KernelError>;

    /// Boolean union.
    fn fuse(&mut self, a: &Self::Solid, b: &Self::Solid) -> Result<Self::Solid, KernelError>;

    /// Boolean subtraction: `a` minus `b`.
    fn cut(&mut self, a: &Self::Solid, b: &Self::Solid) -> Result<Self::Solid, KernelError>;

    /// Union of copies rotated about Z.
    fn circular_pattern(
        &mut self,
        solid: &Self::Solid,
        pattern: &CircularPattern,
    ) -> Result<Self::Solid, KernelError>;

    /// Called by [`build_solid`] before the first operation of a request.
    fn begin_build(&mut self) {}

    /// Called by [`build_solid`] when a request fails partway. Solids created
    /// since [`begin_build`](Self::begin_build) should be discarded.
    fn abort_build(&mut self) {}
}

/// Execute a request: extrude the base, pattern it, then apply each boolean
/// step in order.
///
/// On failure the kernel is told to drop the partial build.
pub fn build_solid<K: GeometryKernel + ?Sized>(
    kernel: &mut K,
    request: &SolidRequest,
) -> Result<K::Solid, KernelError> {
    kernel.begin_build();
    let built = run_request(kernel, request);
    if built.is_err() {
        kernel.abort_build();
    }
    built
}

fn run_request<K: GeometryKernel + ?Sized>(
    kernel: &mut K,
    request: &SolidRequest,
) -> Result<K::Solid, KernelError> {
    let mut solid = kernel.extrude(&request.base)?;
    if let Some(pattern) = &request.pattern {
        solid = kernel.circular_pattern(&solid, pattern)?;
    }
    for step in &request.steps {
        let tool = kernel.extrude(&step.tool)?;
        solid = match step.op {
            BooleanOp::Fuse => kernel.fuse(&solid, &tool)?,
            BooleanOp::Cut => kernel.cut(&solid, &tool)?,
        };
    }
    Ok(solid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use partgen_ir::{Point2D, Profile};

    /// Kernel that spells out every call as a string.
    #[derive(Default)]
    struct TraceKernel {
        calls: Vec<String>,
    }

    impl GeometryKernel for TraceKernel {
        type Solid = String;

        fn extrude(&mut self, body: &Extrusion) -> Result<String, KernelError> {
            self.calls.push(format!("extrude {}", body.name));
            Ok(body.name.clone())
        }

        fn fuse(&mut self, a: &String, b: &String) -> Result<String, KernelError> {
            self.calls.push(format!("fuse {a} {b}"));
            Ok(format!("({a}+{b})"))
        }

        fn cut(&mut self, a: &String, b: &String) -> Result<String, KernelError> {
            self.calls.push(format!("cut {a} {b}"));
            Ok(format!("({a}-{b})"))
        }

        fn circular_pattern(
            &mut self,
            solid: &String,
            pattern: &CircularPattern,
        ) -> Result<String, KernelError> {
            self.calls.push(format!("pattern {solid} x{}", pattern.count));
            Ok(format!("{solid}*{}", pattern.count))
        }
    }

    fn cyl(name: &str) -> Extrusion {
        Extrusion::new(name, Profile::circle(Point2D::origin(), 1.0), 1.0)
    }

    #[test]
    fn test_build_order() {
        let req = SolidRequest::new(cyl("tooth"))
            .with_pattern(CircularPattern::full_turn(3))
            .fuse(cyl("hub"))
            .cut(cyl("bore"));
        let mut kernel = TraceKernel::default();
        let solid = build_solid(&mut kernel, &req).unwrap();

        assert_eq!(solid, "((tooth*3+hub)-bore)");
        assert_eq!(
            kernel.calls,
            vec![
                "extrude tooth",
                "pattern tooth x3",
                "extrude hub",
                "fuse tooth*3 hub",
                "extrude bore",
                "cut (tooth*3+hub) bore",
            ]
        );
    }

    #[test]
    fn test_build_stops_at_first_error() {
        struct NoCut(TraceKernel);

        impl GeometryKernel for NoCut {
            type Solid = String;

            fn extrude(&mut self, body: &Extrusion) -> Result<String, KernelError> {
                self.0.extrude(body)
            }

            fn fuse(&mut self, a: &String, b: &String) -> Result<String, KernelError> {
                self.0.fuse(a, b)
            }

            fn cut(&mut self, _: &String, _: &String) -> Result<String, KernelError> {
                Err(KernelError::OperationFailed("cut".into()))
            }

            fn circular_pattern(
                &mut self,
                solid: &String,
                pattern: &CircularPattern,
            ) -> Result<String, KernelError> {
                self.0.circular_pattern(solid, pattern)
            }

            fn abort_build(&mut self) {
                self.0.calls.push("abort".into());
            }
        }

        let req = SolidRequest::new(cyl("body"))
            .cut(cyl("bore"))
            .fuse(cyl("never"));
        let mut kernel = NoCut(TraceKernel::default());
        let err = build_solid(&mut kernel, &req).unwrap_err();
        assert_eq!(err, KernelError::OperationFailed("cut".into()));
        assert!(!kernel.0.calls.iter().any(|c| c.contains("never")));
        assert_eq!(kernel.0.calls.last().map(String::as_str), Some("abort"));
    }
}
