//! A kernel that records operations instead of building B-rep solids.
//!
//! [`IrKernel`] checks every profile the way a real kernel would before
//! accepting it, then appends a node to a [`Document`]. The document is the
//! exportable record of how each part was built.

use partgen_ir::{
    CircularPattern, Document, Extrusion, KernelOp, Node, NodeId, PartEntry, Point2D, Profile,
    Segment,
};
use partgen_math::{signed_area, Point2, Tolerance};

use crate::kernel::{GeometryKernel, KernelError};

/// Recording kernel; solids are node ids in its [`Document`].
#[derive(Debug, Clone)]
pub struct IrKernel {
    doc: Document,
    next_id: NodeId,
    build_start: NodeId,
    tolerance: Tolerance,
}

impl Default for IrKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl IrKernel {
    /// Empty kernel with default tolerances.
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            next_id: 1,
            build_start: 1,
            tolerance: Tolerance::DEFAULT,
        }
    }

    /// Everything recorded so far.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Consume the kernel, returning its document.
    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Name `solid` and register it as a finished part.
    pub fn finish_part(
        &mut self,
        solid: NodeId,
        name: &str,
        quantity: u32,
    ) -> Result<(), KernelError> {
        let node = self
            .doc
            .nodes
            .get_mut(&solid)
            .ok_or_else(|| KernelError::UnknownSolid(solid.to_string()))?;
        node.name = Some(name.to_string());
        self.doc.parts.push(PartEntry {
            root: solid,
            name: name.to_string(),
            quantity,
        });
        Ok(())
    }

    /// Standalone document holding just `solid`'s construction graph.
    pub fn export_part(
        &self,
        solid: NodeId,
        name: &str,
        quantity: u32,
    ) -> Result<Document, KernelError> {
        let mut doc = self
            .doc
            .subgraph(solid)
            .ok_or_else(|| KernelError::UnknownSolid(solid.to_string()))?;
        doc.parts.push(PartEntry {
            root: solid,
            name: name.to_string(),
            quantity,
        });
        Ok(doc)
    }

    fn push(&mut self, name: Option<String>, op: KernelOp) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.doc.nodes.insert(id, Node { id, name, op });
        id
    }

    fn require(&self, solid: &NodeId) -> Result<(), KernelError> {
        if self.doc.nodes.contains_key(solid) {
            Ok(())
        } else {
            Err(KernelError::UnknownSolid(solid.to_string()))
        }
    }

    fn check_profile(&self, body: &str, profile: &Profile) -> Result<(), KernelError> {
        let degenerate = |reason: String| KernelError::DegenerateProfile {
            body: body.to_string(),
            reason,
        };
        match profile {
            Profile::Circle { center, radius } => {
                if !finite(center) || !radius.is_finite() {
                    return Err(degenerate("non-finite circle".into()));
                }
                if *radius <= self.tolerance.linear {
                    return Err(degenerate(format!("circle radius {radius}")));
                }
                Ok(())
            }
            Profile::Polygon { vertices } => self.check_outline(vertices, &degenerate),
            Profile::Path { segments } => {
                if segments.is_empty() {
                    return Err(degenerate("path has no segments".into()));
                }
                for (i, seg) in segments.iter().enumerate() {
                    let next = &segments[(i + 1) % segments.len()];
                    let (Some(end), Some(start)) = (seg.end(), next.start()) else {
                        return Err(degenerate(format!("segment {i} has no points")));
                    };
                    if !self.tolerance.points_equal(&math(&end), &math(&start)) {
                        return Err(degenerate(format!("gap after segment {i}")));
                    }
                    if let Segment::Spline { points } = seg {
                        if points.len() < 2 {
                            return Err(degenerate(format!("spline {i} needs two points")));
                        }
                    }
                }
                self.check_outline(&profile.outline(), &degenerate)
            }
        }
    }

    fn check_outline(
        &self,
        points: &[Point2D],
        degenerate: &dyn Fn(String) -> KernelError,
    ) -> Result<(), KernelError> {
        if points.len() < 3 {
            return Err(degenerate(format!("{} vertices", points.len())));
        }
        if !points.iter().all(finite) {
            return Err(degenerate("non-finite vertex".into()));
        }
        let pts: Vec<Point2> = points.iter().map(math).collect();
        for (i, p) in pts.iter().enumerate() {
            if self.tolerance.points_equal(p, &pts[(i + 1) % pts.len()]) {
                return Err(degenerate(format!("repeated vertex at {i}")));
            }
        }
        let area = signed_area(&pts);
        if self.tolerance.is_zero(area) {
            return Err(degenerate(format!("zero area ({area})")));
        }
        Ok(())
    }
}

fn math(p: &Point2D) -> Point2 {
    Point2::new(p.x, p.y)
}

fn finite(p: &Point2D) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

impl GeometryKernel for IrKernel {
    type Solid = NodeId;

    fn extrude(&mut self, body: &Extrusion) -> Result<NodeId, KernelError> {
        self.check_profile(&body.name, &body.profile)?;
        if !(body.height.is_finite() && body.height > self.tolerance.linear) {
            return Err(KernelError::InvalidHeight {
                body: body.name.clone(),
                height: body.height,
            });
        }
        Ok(self.push(
            Some(body.name.clone()),
            KernelOp::Extrude {
                profile: body.profile.clone(),
                height: body.height,
                z_offset: body.z_offset,
            },
        ))
    }

    fn fuse(&mut self, a: &NodeId, b: &NodeId) -> Result<NodeId, KernelError> {
        self.require(a)?;
        self.require(b)?;
        Ok(self.push(None, KernelOp::Fuse { left: *a, right: *b }))
    }

    fn cut(&mut self, a: &NodeId, b: &NodeId) -> Result<NodeId, KernelError> {
        self.require(a)?;
        self.require(b)?;
        Ok(self.push(None, KernelOp::Cut { left: *a, right: *b }))
    }

    fn begin_build(&mut self) {
        self.build_start = self.next_id;
    }

    fn abort_build(&mut self) {
        let start = self.build_start;
        self.doc.nodes.retain(|&id, _| id < start);
        self.next_id = start;
    }

    fn circular_pattern(
        &mut self,
        solid: &NodeId,
        pattern: &CircularPattern,
    ) -> Result<NodeId, KernelError> {
        self.require(solid)?;
        if pattern.count == 0 {
            return Err(KernelError::InvalidPattern("count is zero".into()));
        }
        let angle = pattern.total_angle_degrees;
        if !(angle > 0.0 && angle <= 360.0) {
            return Err(KernelError::InvalidPattern(format!(
                "total angle {angle}° outside (0°, 360°]"
            )));
        }
        Ok(self.push(
            None,
            KernelOp::CircularPattern {
                child: *solid,
                count: pattern.count,
                total_angle_degrees: angle,
            },
        ))
    }
}
