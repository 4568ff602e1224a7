//! Dots and the ordered stroke store.

use crate::color::HexColor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A grid cell position, in cell units.
///
/// Serialized as a two element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<GridPos> for (i32, i32) {
    fn from(pos: GridPos) -> Self {
        (pos.x, pos.y)
    }
}

/// One colored grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dot {
    pub position: GridPos,
    pub color: HexColor,
}

impl Dot {
    pub const fn new(x: i32, y: i32, color: HexColor) -> Self {
        Self {
            position: GridPos::new(x, y),
            color,
        }
    }

    pub const fn at(position: GridPos, color: HexColor) -> Self {
        Self { position, color }
    }
}

/// Ordered collection of dots with at most one dot per position.
///
/// Iteration yields dots in paint order. The `occupied` set mirrors the
/// positions in `dots` and answers membership without a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokeStore {
    dots: Vec<Dot>,
    occupied: HashSet<GridPos>,
}

impl StrokeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a dot and return the new count.
    ///
    /// An identical dot is ignored. A dot at an occupied position with a
    /// different color replaces the old entry and moves to the end of the
    /// paint order.
    pub fn add(&mut self, dot: Dot) -> usize {
        if self.occupied.contains(&dot.position) {
            if let Some(index) = self.index_of(dot.position) {
                if self.dots[index].color == dot.color {
                    return self.dots.len();
                }
                self.dots.remove(index);
            }
        }
        self.occupied.insert(dot.position);
        self.dots.push(dot);
        self.dots.len()
    }

    /// Remove the dot at a position. Returns `None` if the cell is empty.
    pub fn remove_at(&mut self, x: i32, y: i32) -> Option<Dot> {
        let position = GridPos::new(x, y);
        if !self.occupied.remove(&position) {
            return None;
        }
        self.index_of(position).map(|index| self.dots.remove(index))
    }

    /// Check whether any dot occupies a position, regardless of color.
    pub fn exists_at(&self, x: i32, y: i32) -> bool {
        self.occupied.contains(&GridPos::new(x, y))
    }

    /// Get the dot at a position.
    pub fn get(&self, x: i32, y: i32) -> Option<&Dot> {
        let position = GridPos::new(x, y);
        if !self.occupied.contains(&position) {
            return None;
        }
        self.dots.iter().find(|dot| dot.position == position)
    }

    /// Remove every dot.
    pub fn clear(&mut self) {
        self.dots.clear();
        self.occupied.clear();
    }

    /// Replace the contents with the given dots, applying the usual add rules.
    pub fn replace_with<I: IntoIterator<Item = Dot>>(&mut self, dots: I) {
        self.clear();
        for dot in dots {
            self.add(dot);
        }
    }

    /// Dots in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, Dot> {
        self.dots.iter()
    }

    pub fn as_slice(&self) -> &[Dot] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    fn index_of(&self, position: GridPos) -> Option<usize> {
        self.dots.iter().position(|dot| dot.position == position)
    }
}

impl<'a> IntoIterator for &'a StrokeStore {
    type Item = &'a Dot;
    type IntoIter = std::slice::Iter<'a, Dot>;

    fn into_iter(self) -> Self::IntoIter {
        self.dots.iter()
    }
}

impl FromIterator<Dot> for StrokeStore {
    fn from_iter<I: IntoIterator<Item = Dot>>(iter: I) -> Self {
        let mut store = Self::new();
        for dot in iter {
            store.add(dot);
        }
        store
    }
}
