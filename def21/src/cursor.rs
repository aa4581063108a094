//!
//! # Path Traversal
//!
//! A [PathCursor] walks a [DefPath] in either direction, reporting the [PathItem] tag of each token,
//! and exposes typed accessors for the token it currently sits on.
//! Cursors borrow their path immutably, so any number may traverse the same path at once.
//!
//! Typical replay of a path, branching on each tag:
//!
//! ```
//! use def21::{DefPath, PathItem};
//!
//! let mut path = DefPath::new();
//! path.add_layer("M1");
//! path.add_point(0, 0);
//!
//! let mut cursor = path.traverse();
//! while let Some(item) = cursor.next() {
//!     match item {
//!         PathItem::Layer => assert_eq!(cursor.layer(), Some("M1")),
//!         PathItem::Point => assert_eq!(cursor.point().map(|p| p.x), Some(0)),
//!         _ => (),
//!     }
//! }
//! ```
//!

// Crates.io Imports
use log::warn;

// Local Imports
use crate::data::{DefInt, DefOrient, DefPoint};
use crate::path::{DefPath, FlushPoint, PathItem, PathToken, ViaData, ViaMask, ViaRect};

/// # Path Cursor
///
/// Position is one of `-1` (before the first token), a valid token index, or `len` (after the last token).
/// Stepping past either end returns `None` and leaves the cursor parked just outside the sequence.
#[derive(Debug, Clone)]
pub struct PathCursor<'p> {
    path: &'p DefPath,
    pos: isize,
}
impl<'p> PathCursor<'p> {
    /// Create a cursor before the first token of `path`, ready for forward traversal
    pub fn new(path: &'p DefPath) -> Self {
        Self { path, pos: -1 }
    }
    /// Create a cursor after the last token of `path`, ready for backward traversal
    pub fn new_backwards(path: &'p DefPath) -> Self {
        Self {
            path,
            pos: path.len() as isize,
        }
    }
    /// Reset to before the first token
    pub fn init_traverse(&mut self) {
        self.pos = -1;
    }
    /// Reset to after the last token
    pub fn init_traverse_backwards(&mut self) {
        self.pos = self.path.len() as isize;
    }
    /// Step backwards, returning the [PathItem] tag of the new current token,
    /// or `None` once we move before the first token.
    pub fn prev(&mut self) -> Option<PathItem> {
        if self.pos >= 0 {
            self.pos -= 1;
        }
        self.token().map(PathToken::item)
    }
    /// Get the token under the cursor, if there is one
    pub fn token(&self) -> Option<&'p PathToken> {
        let path: &'p DefPath = self.path;
        usize::try_from(self.pos)
            .ok()
            .and_then(|idx| path.tokens().get(idx))
    }

    pub fn layer(&self) -> Option<&'p str> {
        match self.token() {
            Some(PathToken::Layer(s)) => Some(s.as_str()),
            other => self.mismatch(PathItem::Layer, other),
        }
    }
    pub fn via(&self) -> Option<&'p str> {
        match self.token() {
            Some(PathToken::Via(s)) => Some(s.as_str()),
            other => self.mismatch(PathItem::Via, other),
        }
    }
    pub fn shape(&self) -> Option<&'p str> {
        match self.token() {
            Some(PathToken::Shape(s)) => Some(s.as_str()),
            other => self.mismatch(PathItem::Shape, other),
        }
    }
    pub fn taper_rule(&self) -> Option<&'p str> {
        match self.token() {
            Some(PathToken::TaperRule(s)) => Some(s.as_str()),
            other => self.mismatch(PathItem::TaperRule, other),
        }
    }
    pub fn width(&self) -> Option<DefInt> {
        match self.token() {
            Some(PathToken::Width(w)) => Some(*w),
            other => self.mismatch(PathItem::Width, other),
        }
    }
    pub fn style(&self) -> Option<i32> {
        match self.token() {
            Some(PathToken::Style(s)) => Some(*s),
            other => self.mismatch(PathItem::Style, other),
        }
    }
    pub fn via_rotation(&self) -> Option<DefOrient> {
        match self.token() {
            Some(PathToken::ViaRotation(o)) => Some(*o),
            other => self.mismatch(PathItem::ViaRotation, other),
        }
    }
    pub fn mask(&self) -> Option<i32> {
        match self.token() {
            Some(PathToken::Mask(m)) => Some(*m),
            other => self.mismatch(PathItem::Mask, other),
        }
    }
    pub fn via_rect(&self) -> Option<ViaRect> {
        match self.token() {
            Some(PathToken::ViaRect(r)) => Some(*r),
            other => self.mismatch(PathItem::ViaRect, other),
        }
    }
    pub fn via_data(&self) -> Option<ViaData> {
        match self.token() {
            Some(PathToken::ViaData(d)) => Some(*d),
            other => self.mismatch(PathItem::ViaData, other),
        }
    }
    pub fn point(&self) -> Option<DefPoint> {
        match self.token() {
            Some(PathToken::Point(p)) => Some(*p),
            other => self.mismatch(PathItem::Point, other),
        }
    }
    pub fn flush_point(&self) -> Option<FlushPoint> {
        match self.token() {
            Some(PathToken::FlushPoint(p)) => Some(*p),
            other => self.mismatch(PathItem::FlushPoint, other),
        }
    }
    pub fn virtual_point(&self) -> Option<DefPoint> {
        match self.token() {
            Some(PathToken::VirtualPoint(p)) => Some(*p),
            other => self.mismatch(PathItem::VirtualPoint, other),
        }
    }
    pub fn via_mask(&self) -> Option<ViaMask> {
        match self.token() {
            Some(PathToken::ViaMask(m)) => Some(*m),
            other => self.mismatch(PathItem::ViaMask, other),
        }
    }
    pub fn via_top_mask(&self) -> Option<i32> {
        self.via_mask().map(|m| m.top())
    }
    pub fn via_cut_mask(&self) -> Option<i32> {
        self.via_mask().map(|m| m.cut())
    }
    pub fn via_bottom_mask(&self) -> Option<i32> {
        self.via_mask().map(|m| m.bottom())
    }
    /// Report an accessor called on the wrong kind of token, or with no token under the cursor
    fn mismatch<T>(&self, expected: PathItem, found: Option<&PathToken>) -> Option<T> {
        match found {
            Some(tok) => warn!(
                "Path accessor for {:?} called on {:?} at position {}",
                expected,
                tok.item(),
                self.pos
            ),
            None => warn!(
                "Path accessor for {:?} called at position {}, outside the path",
                expected, self.pos
            ),
        }
        None
    }
}
impl<'p> Iterator for PathCursor<'p> {
    type Item = PathItem;
    /// Step forward, returning the [PathItem] tag of the new current token,
    /// or `None` once we move past the last token.
    fn next(&mut self) -> Option<PathItem> {
        let len = self.path.len() as isize;
        if self.pos < len {
            self.pos += 1;
        }
        self.token().map(PathToken::item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_saturates_at_ends() {
        let mut path = DefPath::new();
        path.add_width(5);
        let mut c = path.traverse();
        assert_eq!(c.next(), Some(PathItem::Width));
        assert_eq!(c.next(), None);
        assert_eq!(c.next(), None);
        // One step back from the parked position lands on the last token again
        assert_eq!(c.prev(), Some(PathItem::Width));
        assert_eq!(c.width(), Some(5));
        assert_eq!(c.prev(), None);
        assert_eq!(c.prev(), None);
        assert_eq!(c.next(), Some(PathItem::Width));
    }
    #[test]
    fn accessors_before_traversal() {
        let mut path = DefPath::new();
        path.add_layer("M2");
        let c = path.traverse();
        assert_eq!(c.token(), None);
        assert_eq!(c.layer(), None);
    }
}
