//! Intermediate representation for partgen.
//!
//! Two layers live here. [`SolidRequest`] is the contract the profile
//! generator hands to a geometry kernel: a base extrusion, an optional
//! circular pattern, and an ordered list of fuse/cut steps. [`Document`] is
//! the DAG a recording kernel produces while executing requests, and is what
//! gets written to disk.
//!
//! Everything here is purely declarative: no solids, no meshes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Unique identifier for a node in the construction graph.
pub type NodeId = u64;

/// Point in the sketch plane (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Point2D {
    /// Create a new Point2D.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The sketch origin.
    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Distance from the sketch origin.
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// One piece of a [`Profile::Path`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Segment {
    /// Straight line from start to end.
    Line {
        /// Start point.
        start: Point2D,
        /// End point.
        end: Point2D,
    },
    /// Spline fitted through the points, in order.
    Spline {
        /// Fit points; the first and last are the spline endpoints.
        points: Vec<Point2D>,
    },
}

impl Segment {
    /// First point of the segment.
    pub fn start(&self) -> Option<Point2D> {
        match self {
            Segment::Line { start, .. } => Some(*start),
            Segment::Spline { points } => points.first().copied(),
        }
    }

    /// Last point of the segment.
    pub fn end(&self) -> Option<Point2D> {
        match self {
            Segment::Line { end, .. } => Some(*end),
            Segment::Spline { points } => points.last().copied(),
        }
    }
}

/// A closed outline in the sketch plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Profile {
    /// Full circle.
    Circle {
        /// Circle center.
        center: Point2D,
        /// Circle radius.
        radius: f64,
    },
    /// Closed polyline; the last vertex connects back to the first.
    Polygon {
        /// Vertices in winding order.
        vertices: Vec<Point2D>,
    },
    /// Chain of segments, each starting where the previous one ended.
    Path {
        /// Segments in order.
        segments: Vec<Segment>,
    },
}

impl Profile {
    /// Circle centered at `center`.
    pub fn circle(center: Point2D, radius: f64) -> Self {
        Profile::Circle { center, radius }
    }

    /// Closed polygon through `vertices`.
    pub fn polygon(vertices: Vec<Point2D>) -> Self {
        Profile::Polygon { vertices }
    }

    /// Outline points of a polygon or path, with spline fit points used as
    /// chords and shared segment endpoints listed once. Empty for circles.
    pub fn outline(&self) -> Vec<Point2D> {
        match self {
            Profile::Circle { .. } => Vec::new(),
            Profile::Polygon { vertices } => vertices.clone(),
            Profile::Path { segments } => {
                let mut out = Vec::new();
                for seg in segments {
                    match seg {
                        Segment::Line { start, .. } => out.push(*start),
                        Segment::Spline { points } => {
                            // Drop the last fit point: the next segment starts there.
                            let n = points.len().saturating_sub(1);
                            out.extend_from_slice(&points[..n]);
                        }
                    }
                }
                out
            }
        }
    }
}

/// A profile extruded along +Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    /// Body name (e.g. "bore", "bolt_hole_2").
    pub name: String,
    /// Sketch outline.
    pub profile: Profile,
    /// Extrusion distance.
    pub height: f64,
    /// Offset of the sketch plane along the extrusion axis.
    #[serde(default)]
    pub z_offset: f64,
}

impl Extrusion {
    /// Extrusion starting on the XY plane.
    pub fn new(name: impl Into<String>, profile: Profile, height: f64) -> Self {
        Self {
            name: name.into(),
            profile,
            height,
            z_offset: 0.0,
        }
    }

    /// Cylinder of `radius` centered on `center`.
    pub fn cylinder(name: impl Into<String>, center: Point2D, radius: f64, height: f64) -> Self {
        Self::new(name, Profile::circle(center, radius), height)
    }

    /// Move the sketch plane to `z`.
    pub fn at_z(mut self, z: f64) -> Self {
        self.z_offset = z;
        self
    }

    /// Top of the extruded body.
    pub fn top(&self) -> f64 {
        self.z_offset + self.height
    }
}

/// Boolean operation applied with a tool body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOp {
    /// Union.
    Fuse,
    /// Subtraction (current body minus tool).
    Cut,
}

/// One boolean step of a [`SolidRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanStep {
    /// Operation to apply.
    pub op: BooleanOp,
    /// Tool body.
    pub tool: Extrusion,
}

/// Copies of a body rotated evenly about the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularPattern {
    /// Total number of instances, including the original.
    pub count: u32,
    /// Angle spanned by the pattern, in degrees.
    pub total_angle_degrees: f64,
}

impl CircularPattern {
    /// `count` instances spread over a full turn.
    pub fn full_turn(count: u32) -> Self {
        Self {
            count,
            total_angle_degrees: 360.0,
        }
    }
}

/// Everything a geometry kernel needs to build one part.
///
/// Execution order: extrude `base`, apply `pattern` to it, then apply `steps`
/// in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidRequest {
    /// First body.
    pub base: Extrusion,
    /// Optional circular pattern of the base body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<CircularPattern>,
    /// Boolean steps applied after the pattern.
    #[serde(default)]
    pub steps: Vec<BooleanStep>,
}

impl SolidRequest {
    /// Request with only a base body.
    pub fn new(base: Extrusion) -> Self {
        Self {
            base,
            pattern: None,
            steps: Vec::new(),
        }
    }

    /// Append a fuse step.
    pub fn fuse(mut self, tool: Extrusion) -> Self {
        self.steps.push(BooleanStep {
            op: BooleanOp::Fuse,
            tool,
        });
        self
    }

    /// Append a cut step.
    pub fn cut(mut self, tool: Extrusion) -> Self {
        self.steps.push(BooleanStep {
            op: BooleanOp::Cut,
            tool,
        });
        self
    }

    /// Set the circular pattern applied to the base body.
    pub fn with_pattern(mut self, pattern: CircularPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Tool bodies of the given operation, in order.
    pub fn tools(&self, op: BooleanOp) -> impl Iterator<Item = &Extrusion> {
        self.steps
            .iter()
            .filter(move |s| s.op == op)
            .map(|s| &s.tool)
    }

    /// Overall height of the request's bodies.
    pub fn height(&self) -> f64 {
        self.steps
            .iter()
            .filter(|s| s.op == BooleanOp::Fuse)
            .map(|s| s.tool.top())
            .fold(self.base.top(), f64::max)
    }
}

/// Kernel operation recorded in a [`Document`].
///
/// Each variant is either a leaf extrusion or an operation that references
/// child nodes by [`NodeId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KernelOp {
    /// Profile extruded along +Z.
    Extrude {
        /// Sketch outline.
        profile: Profile,
        /// Extrusion distance.
        height: f64,
        /// Sketch plane offset along Z.
        z_offset: f64,
    },
    /// Boolean union.
    Fuse {
        /// Left operand.
        left: NodeId,
        /// Right operand.
        right: NodeId,
    },
    /// Boolean difference (left minus right).
    Cut {
        /// Left operand (base).
        left: NodeId,
        /// Right operand (subtracted).
        right: NodeId,
    },
    /// Circular pattern about the Z axis.
    CircularPattern {
        /// Patterned body.
        child: NodeId,
        /// Instance count.
        count: u32,
        /// Angle spanned, in degrees.
        total_angle_degrees: f64,
    },
}

impl KernelOp {
    /// Nodes this operation reads from.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            KernelOp::Extrude { .. } => Vec::new(),
            KernelOp::Fuse { left, right } | KernelOp::Cut { left, right } => vec![*left, *right],
            KernelOp::CircularPattern { child, .. } => vec![*child],
        }
    }
}

/// A node in the construction graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Optional human-readable name.
    pub name: Option<String>,
    /// The operation this node represents.
    pub op: KernelOp,
}

/// A finished part: a root node plus bill-of-materials data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartEntry {
    /// Root node of the part.
    pub root: NodeId,
    /// Part name.
    pub name: String,
    /// How many of this part are needed.
    pub quantity: u32,
}

/// A partgen document: the `.json` file written per part or per batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version string.
    pub version: String,
    /// All nodes in the graph, keyed by [`NodeId`].
    pub nodes: BTreeMap<NodeId, Node>,
    /// Finished parts.
    pub parts: Vec<PartEntry>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            nodes: BTreeMap::new(),
            parts: Vec::new(),
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the sub-graph reachable from `root`, or `None` if `root` is
    /// not in this document. The result has no part entries.
    pub fn subgraph(&self, root: NodeId) -> Option<Document> {
        if !self.nodes.contains_key(&root) {
            return None;
        }
        let mut seen = BTreeSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.op.children());
            }
        }
        let mut doc = Document {
            version: self.version.clone(),
            ..Document::default()
        };
        for id in seen {
            if let Some(node) = self.nodes.get(&id) {
                doc.nodes.insert(id, node.clone());
            }
        }
        Some(doc)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
