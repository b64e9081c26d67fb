//! Caret and selection.

use std::ops::Range;

/// A directional selection: `anchor` stays put while `head` follows the caret.
///
/// The pair is never reordered, so shift-extending after a backwards drag keeps
/// growing from the original anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    /// A collapsed selection (a caret) at `pos`.
    pub const fn caret(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Collapse to a caret at `pos`.
    pub fn collapse_to(&mut self, pos: usize) {
        self.anchor = pos;
        self.head = pos;
    }

    /// Set anchor and head verbatim.
    pub fn set_range(&mut self, anchor: usize, head: usize) {
        self.anchor = anchor;
        self.head = head;
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The selected range, start to end.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Clamp both ends to `[0, len]`.
    pub fn clamp(&mut self, len: usize) {
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_range_keeps_direction() {
        let mut sel = Selection::default();
        sel.set_range(8, 3);
        assert_eq!((sel.anchor, sel.head), (8, 3));
        assert_eq!((sel.start(), sel.end()), (3, 8));
        assert_eq!(sel.range(), 3..8);
        assert!(!sel.is_empty());
    }

    #[test]
    fn test_collapse_and_clamp() {
        let mut sel = Selection::caret(2);
        assert!(sel.is_empty());
        sel.set_range(4, 10);
        sel.clamp(6);
        assert_eq!((sel.anchor, sel.head), (4, 6));
        sel.collapse_to(1);
        assert_eq!(sel, Selection::caret(1));
    }
}
