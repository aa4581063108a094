//!
//! # Routing Paths
//!
//! Each DEF routed wire (`+ ROUTED`, `NEW`, `+ SHIELD` and the like) is stored as a [DefPath]:
//! an ordered sequence of heterogeneous [PathToken]s, kept exactly in the order they appear in DEF.
//! Order carries the meaning: a layer, then widths, vias and points, then the next layer, and so on.
//!
//! [DefPath]s are built one token at a time with the `add_*` methods,
//! and replayed either as a plain slice of [PathToken]s, or through a [PathCursor]
//! which walks the sequence in either direction.
//!

// Crates.io Imports
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// Local Imports
use crate::cursor::PathCursor;
use crate::data::{DefInt, DefOrient, DefPoint};

/// Initial token-capacity of each new [DefPath]
const INITIAL_TOKENS: usize = 16;

/// # Via Cut-Rectangle Offsets
///
/// The `RECT ( dx1 dy1 dx2 dy2 )` of a path, relative to its preceding point.
#[derive(Clone, Copy, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct ViaRect {
    pub dx1: DefInt,
    pub dy1: DefInt,
    pub dx2: DefInt,
    pub dy2: DefInt,
}
/// # Via Array
///
/// The `DO num_x BY num_y STEP step_x step_y` replication of a via.
#[derive(Clone, Copy, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct ViaData {
    pub num_x: DefInt,
    pub num_y: DefInt,
    pub step_x: DefInt,
    pub step_y: DefInt,
}
/// # Flush Point
///
/// A routing vertex with an explicit end-cap extension, `( x y ext )`.
#[derive(Clone, Copy, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct FlushPoint {
    pub x: DefInt,
    pub y: DefInt,
    pub ext: DefInt,
}
impl FlushPoint {
    /// The `(x, y)` location, without extension
    pub fn loc(&self) -> DefPoint {
        DefPoint::new(self.x, self.y)
    }
}
/// # Via Color Mask
///
/// Three decimal digits packed into one integer, ordered top-cut-bottom:
/// via-mask `123` has top-mask 1, cut-mask 2, and bottom-mask 3.
#[derive(Clone, Copy, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct ViaMask(pub i32);
impl ViaMask {
    /// Create from the three separate masks
    pub fn from_parts(top: i32, cut: i32, bottom: i32) -> Self {
        Self(top * 100 + cut * 10 + bottom)
    }
    pub fn top(&self) -> i32 {
        self.0 / 100
    }
    pub fn cut(&self) -> i32 {
        (self.0 / 10) % 10
    }
    pub fn bottom(&self) -> i32 {
        self.0 % 10
    }
}

/// # Path Token
///
/// One element of a [DefPath].
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum PathToken {
    /// Routing layer name
    Layer(String),
    /// Non-default rule governing tapered widths
    TaperRule(String),
    /// Use the default (tapered) width
    Taper,
    /// Special-wiring shape type, e.g. `STRIPE`
    Shape(String),
    /// Style index
    Style(i32),
    /// Via name
    Via(String),
    /// Via orientation
    ViaRotation(DefOrient),
    /// Via cut-rectangle offsets
    ViaRect(ViaRect),
    /// Via array replication
    ViaData(ViaData),
    /// Segment width
    Width(DefInt),
    /// Routing vertex
    Point(DefPoint),
    /// Routing vertex with end-cap extension
    FlushPoint(FlushPoint),
    /// Non-physical vertex, for virtual wiring
    VirtualPoint(DefPoint),
    /// Color mask of the following point
    Mask(i32),
    /// Composite color mask of the following via
    ViaMask(ViaMask),
}
impl PathToken {
    /// Get our [PathItem] tag
    pub fn item(&self) -> PathItem {
        match self {
            Self::Layer(_) => PathItem::Layer,
            Self::TaperRule(_) => PathItem::TaperRule,
            Self::Taper => PathItem::Taper,
            Self::Shape(_) => PathItem::Shape,
            Self::Style(_) => PathItem::Style,
            Self::Via(_) => PathItem::Via,
            Self::ViaRotation(_) => PathItem::ViaRotation,
            Self::ViaRect(_) => PathItem::ViaRect,
            Self::ViaData(_) => PathItem::ViaData,
            Self::Width(_) => PathItem::Width,
            Self::Point(_) => PathItem::Point,
            Self::FlushPoint(_) => PathItem::FlushPoint,
            Self::VirtualPoint(_) => PathItem::VirtualPoint,
            Self::Mask(_) => PathItem::Mask,
            Self::ViaMask(_) => PathItem::ViaMask,
        }
    }
}

/// # Path Item
///
/// Fieldless tag of each [PathToken] variant,
/// as reported by [PathCursor] traversal.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub enum PathItem {
    Layer,
    TaperRule,
    Taper,
    Shape,
    Style,
    Via,
    ViaRotation,
    ViaRect,
    ViaData,
    Width,
    Point,
    FlushPoint,
    VirtualPoint,
    Mask,
    ViaMask,
}

/// # Def Routing Path
///
/// Append-only sequence of [PathToken]s.
/// Tokens cannot be removed individually; the sequence is only ever cleared or replaced whole.
/// No ordering rules are checked here. Building a sensible sequence is up to the caller.
///
/// Cloning produces a fully independent deep copy.
/// [DefPath::take] moves the content out, leaving an empty path behind.
///
#[derive(Clone, Default, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DefPath {
    tokens: Vec<PathToken>,
}
impl DefPath {
    /// Create a new and initially empty [DefPath]
    pub fn new() -> Self {
        Self {
            tokens: Vec::with_capacity(INITIAL_TOKENS),
        }
    }
    /// Append a generic [PathToken]
    pub fn push(&mut self, token: PathToken) {
        self.tokens.push(token);
    }
    pub fn add_layer(&mut self, name: impl Into<String>) {
        self.push(PathToken::Layer(name.into()));
    }
    pub fn add_via(&mut self, name: impl Into<String>) {
        self.push(PathToken::Via(name.into()));
    }
    pub fn add_via_rotation(&mut self, orient: DefOrient) {
        self.push(PathToken::ViaRotation(orient));
    }
    pub fn add_via_rect(&mut self, dx1: DefInt, dy1: DefInt, dx2: DefInt, dy2: DefInt) {
        self.push(PathToken::ViaRect(ViaRect { dx1, dy1, dx2, dy2 }));
    }
    pub fn add_via_data(&mut self, num_x: DefInt, num_y: DefInt, step_x: DefInt, step_y: DefInt) {
        self.push(PathToken::ViaData(ViaData {
            num_x,
            num_y,
            step_x,
            step_y,
        }));
    }
    pub fn add_width(&mut self, width: DefInt) {
        self.push(PathToken::Width(width));
    }
    pub fn add_point(&mut self, x: DefInt, y: DefInt) {
        self.push(PathToken::Point(DefPoint::new(x, y)));
    }
    pub fn add_flush_point(&mut self, x: DefInt, y: DefInt, ext: DefInt) {
        self.push(PathToken::FlushPoint(FlushPoint { x, y, ext }));
    }
    pub fn add_virtual_point(&mut self, x: DefInt, y: DefInt) {
        self.push(PathToken::VirtualPoint(DefPoint::new(x, y)));
    }
    /// Add the `TAPER` marker
    pub fn set_taper(&mut self) {
        self.push(PathToken::Taper);
    }
    pub fn add_taper_rule(&mut self, name: impl Into<String>) {
        self.push(PathToken::TaperRule(name.into()));
    }
    pub fn add_shape(&mut self, name: impl Into<String>) {
        self.push(PathToken::Shape(name.into()));
    }
    pub fn add_style(&mut self, style: i32) {
        self.push(PathToken::Style(style));
    }
    pub fn add_mask(&mut self, color_mask: i32) {
        self.push(PathToken::Mask(color_mask));
    }
    /// Add a composite via-mask, packed as three top-cut-bottom decimal digits
    pub fn add_via_mask(&mut self, color_mask: i32) {
        self.push(PathToken::ViaMask(ViaMask(color_mask)));
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
    /// Get our tokens as a slice, in append order
    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }
    /// Iterate over our tokens, in either direction
    pub fn iter(&self) -> std::slice::Iter<'_, PathToken> {
        self.tokens.iter()
    }
    /// Create a [PathCursor] positioned before our first token
    pub fn traverse(&self) -> PathCursor<'_> {
        PathCursor::new(self)
    }
    /// Create a [PathCursor] positioned after our last token
    pub fn traverse_backwards(&self) -> PathCursor<'_> {
        PathCursor::new_backwards(self)
    }
    /// Reverse the token order in place
    pub fn reverse_order(&mut self) {
        self.tokens.reverse();
    }
    /// Remove all tokens
    pub fn clear(&mut self) {
        self.tokens.clear();
    }
    /// Move our content into a new [DefPath], leaving `self` empty
    pub fn take(&mut self) -> DefPath {
        std::mem::take(self)
    }
}
impl From<Vec<PathToken>> for DefPath {
    fn from(tokens: Vec<PathToken>) -> Self {
        Self { tokens }
    }
}
impl FromIterator<PathToken> for DefPath {
    fn from_iter<I: IntoIterator<Item = PathToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}
impl Extend<PathToken> for DefPath {
    fn extend<I: IntoIterator<Item = PathToken>>(&mut self, iter: I) {
        self.tokens.extend(iter)
    }
}
impl<'p> IntoIterator for &'p DefPath {
    type Item = &'p PathToken;
    type IntoIter = std::slice::Iter<'p, PathToken>;
    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
impl IntoIterator for DefPath {
    type Item = PathToken;
    type IntoIter = std::vec::IntoIter<PathToken>;
    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
