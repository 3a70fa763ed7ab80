//! Shape definitions for the editing canvas.

mod frame;
mod group;
mod image;
mod line;
mod oval;
mod polyline;
mod rectangle;
mod triangle;

pub use frame::{Frame, Origin, OriginX, OriginY};
pub use group::Group;
pub use image::Image;
pub use line::Line;
pub use oval::Oval;
pub use polyline::Polyline;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke dash style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = transparent).
    pub fill_color: Option<SerializableColor>,
    /// Dash pattern of the stroke.
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Keep the stroke width constant when the shape is scaled.
    #[serde(default)]
    pub stroke_uniform: bool,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
            fill_color: None,
            stroke_style: StrokeStyle::default(),
            stroke_uniform: false,
        }
    }
}

/// Interaction flags carried through snapshots and clipboard clones.
///
/// This is the complete set of non-geometric state that survives a
/// snapshot round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionFlags {
    pub selectable: bool,
    pub has_controls: bool,
    pub evented: bool,
    pub lock_rotation: bool,
    pub lock_movement_x: bool,
    pub lock_movement_y: bool,
    pub no_scale_cache: bool,
    pub selection_background_color: Option<SerializableColor>,
}

impl Default for InteractionFlags {
    fn default() -> Self {
        Self {
            selectable: true,
            has_controls: true,
            evented: true,
            lock_rotation: false,
            lock_movement_x: false,
            lock_movement_y: false,
            no_scale_cache: true,
            selection_background_color: None,
        }
    }
}

impl InteractionFlags {
    /// Flags for shapes the user can neither select nor transform.
    pub fn locked() -> Self {
        Self {
            selectable: false,
            has_controls: false,
            ..Self::default()
        }
    }

    /// Whether the user has been denied any interaction with the shape.
    pub fn is_locked(&self) -> bool {
        !self.selectable && !self.has_controls
    }
}

/// What part a shape plays on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeRole {
    /// An ordinary user drawing.
    #[default]
    Drawing,
    /// The rectangle marking the logical drawing surface.
    Workspace,
    /// The bitmap an annotation workspace is built on.
    Background,
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in logical coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in logical coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Get the interaction flags.
    fn flags(&self) -> &InteractionFlags;

    /// Get mutable interaction flags.
    fn flags_mut(&mut self) -> &mut InteractionFlags;

    /// Move the shape by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Whether the geometry has collapsed to nothing a user could see.
    fn is_degenerate(&self) -> bool;
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Oval(Oval),
    Triangle(Triangle),
    Polyline(Polyline),
    Image(Image),
    Group(Group),
}

impl Shape {
    fn as_dyn(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Oval(s) => s,
            Shape::Triangle(s) => s,
            Shape::Polyline(s) => s,
            Shape::Image(s) => s,
            Shape::Group(s) => s,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Oval(s) => s,
            Shape::Triangle(s) => s,
            Shape::Polyline(s) => s,
            Shape::Image(s) => s,
            Shape::Group(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_dyn().id()
    }

    pub fn bounds(&self) -> Rect {
        self.as_dyn().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_dyn().hit_test(point, tolerance)
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_dyn().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_dyn_mut().style_mut()
    }

    pub fn flags(&self) -> &InteractionFlags {
        self.as_dyn().flags()
    }

    pub fn flags_mut(&mut self) -> &mut InteractionFlags {
        self.as_dyn_mut().flags_mut()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_dyn_mut().translate(delta);
    }

    pub fn is_degenerate(&self) -> bool {
        self.as_dyn().is_degenerate()
    }

    /// Role of the shape on the canvas. Groups are always plain drawings.
    pub fn role(&self) -> ShapeRole {
        match self {
            Shape::Rectangle(r) => r.role,
            Shape::Image(i) => i.role,
            _ => ShapeRole::Drawing,
        }
    }

    /// Check if this shape marks the logical drawing surface.
    pub fn is_workspace(&self) -> bool {
        self.role() == ShapeRole::Workspace
    }

    /// Get the group if this shape is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Regenerate the shape's ID (and its children's) with fresh identifiers.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Line(s) => s.id = new_id,
            Shape::Rectangle(s) => s.id = new_id,
            Shape::Oval(s) => s.id = new_id,
            Shape::Triangle(s) => s.id = new_id,
            Shape::Polyline(s) => s.id = new_id,
            Shape::Image(s) => s.id = new_id,
            Shape::Group(s) => {
                s.id = new_id;
                for child in &mut s.children {
                    child.regenerate_id();
                }
            }
        }
    }

    /// Deep copy that keeps only serialized state.
    ///
    /// Goes through the snapshot encoding so that render caches never
    /// leak into the copy.
    pub fn detached_clone(&self) -> Result<Shape, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        serde_json::from_value(value)
    }
}
