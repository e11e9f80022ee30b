//! Ordered choice-group container
//!
//! Schemas often declare content as `(A | B | C | ...)*`: any number of
//! children, each one of several element kinds, in any order. Consumers need
//! two views of that content at once: the full interleaved sequence (for
//! output, where document order is authoritative) and per-kind access such as
//! "the second `w:bookmarkStart`".
//!
//! [`ChoiceSequence`] stores a single ordered list of items. Each item is a
//! value of a closed enum whose variant determines its kind, so an item can
//! never disagree with its tag. All per-kind operations take a zero-based
//! *ordinal within the kind*, not an absolute position, and resolve it with
//! one linear scan ([`ChoiceSequence::position_of`]).
//!
//! The container has no internal synchronization. Mutation needs `&mut`, so
//! a sequence shared across threads must be guarded by its owner.
//!
//! # Example
//!
//! ```ignore
//! use wml_ooxml::{BlockKind, BlockLevelElement, ChoiceSequence};
//!
//! let mut content: ChoiceSequence<BlockLevelElement> = ChoiceSequence::new();
//! content.append_new(BlockKind::P);
//! content.append_new(BlockKind::BookmarkStart);
//! content.insert_new(BlockKind::P, 0);
//!
//! assert_eq!(content.count_of_kind(BlockKind::P), 2);
//! assert!(content.get_at(BlockKind::Tbl, 0).is_none());
//! ```

use std::fmt;
use std::io::Write;

use quick_xml::Writer;

use crate::error::{Result, WmlError};
use crate::node::{local_part, XmlNode};

/// The closed set of kinds a choice group admits
pub trait ChoiceKind: Copy + Eq + fmt::Debug + 'static {
    /// Every declared kind
    const ALL: &'static [Self];

    /// Qualified element name written for this kind (e.g. `w:p`)
    fn element_name(self) -> &'static str;

    /// Resolve an element name to its kind, ignoring any namespace prefix
    fn from_element_name(name: &str) -> Option<Self> {
        let local = local_part(name);
        Self::ALL
            .iter()
            .copied()
            .find(|kind| local_part(kind.element_name()) == local)
    }
}

/// An item of a choice group: a payload tagged by its variant
pub trait ChoiceItem: Sized {
    type Kind: ChoiceKind;

    /// Kind of this item
    fn kind(&self) -> Self::Kind;

    /// A fresh default-valued item of the given kind
    fn new_of_kind(kind: Self::Kind) -> Self;

    /// Build an item of the given kind from its element
    fn from_node(kind: Self::Kind, node: &XmlNode) -> Result<Self>;

    /// Render this item under its kind's element name
    fn to_node(&self) -> XmlNode;
}

/// An ordered, heterogeneous sequence with per-kind indexed access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSequence<T> {
    items: Vec<T>,
}

impl<T> Default for ChoiceSequence<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: ChoiceItem> ChoiceSequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from the child elements of `node`
    ///
    /// Children whose name is not a declared kind are skipped. Input order
    /// is kept.
    pub fn parse_children(node: &XmlNode) -> Result<Self> {
        let mut items = Vec::new();
        for child in node.elements() {
            match T::Kind::from_element_name(&child.name) {
                Some(kind) => items.push(T::from_node(kind, child)?),
                None => {
                    log::debug!(
                        "Skipping unrecognized element <{}> in <{}>",
                        child.name,
                        node.name
                    );
                }
            }
        }
        Ok(Self { items })
    }

    /// Absolute position of the `n`-th item of `kind`
    ///
    /// Every per-kind operation resolves its ordinal through this scan.
    pub fn position_of(&self, kind: T::Kind, n: usize) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.kind() == kind)
            .nth(n)
            .map(|(pos, _)| pos)
    }

    /// Number of items of `kind`
    pub fn count_of_kind(&self, kind: T::Kind) -> usize {
        self.items.iter().filter(|item| item.kind() == kind).count()
    }

    /// The `n`-th item of `kind`, if present
    pub fn get_at(&self, kind: T::Kind, n: usize) -> Option<&T> {
        self.position_of(kind, n).map(|pos| &self.items[pos])
    }

    /// Mutable access to the `n`-th item of `kind`, if present
    pub fn get_at_mut(&mut self, kind: T::Kind, n: usize) -> Option<&mut T> {
        let pos = self.position_of(kind, n)?;
        self.items.get_mut(pos)
    }

    /// Append a fresh item of `kind` at the end of the sequence
    pub fn append_new(&mut self, kind: T::Kind) -> &mut T {
        log::trace!("Appending {:?} at {}", kind, self.items.len());
        let pos = self.items.len();
        self.items.push(T::new_of_kind(kind));
        &mut self.items[pos]
    }

    /// Insert a fresh item so that it becomes the `n`-th item of `kind`
    ///
    /// The item goes immediately before the current `n`-th item of `kind`,
    /// or at the end of the sequence when `n` equals the count. Returns
    /// `None` without changing anything when `n` is past the count.
    pub fn insert_new(&mut self, kind: T::Kind, n: usize) -> Option<&mut T> {
        let pos = match self.position_of(kind, n) {
            Some(pos) => pos,
            None if n == self.count_of_kind(kind) => self.items.len(),
            None => return None,
        };
        log::trace!("Inserting {:?} #{} at {}", kind, n, pos);
        self.items.insert(pos, T::new_of_kind(kind));
        self.items.get_mut(pos)
    }

    /// Overwrite the `n`-th item of `kind` in place
    ///
    /// Returns the replaced item, or `None` when there is no `n`-th item.
    /// A value of another kind is rejected with [`WmlError::KindMismatch`]
    /// and the sequence is left unchanged.
    pub fn replace(&mut self, kind: T::Kind, n: usize, value: T) -> Result<Option<T>> {
        if value.kind() != kind {
            return Err(WmlError::KindMismatch {
                expected: kind.element_name(),
                found: value.kind().element_name(),
            });
        }
        Ok(self
            .position_of(kind, n)
            .map(|pos| std::mem::replace(&mut self.items[pos], value)))
    }

    /// Remove the `n`-th item of `kind`, shifting later items
    pub fn remove_at(&mut self, kind: T::Kind, n: usize) -> Option<T> {
        let pos = self.position_of(kind, n)?;
        log::trace!("Removing {:?} #{} at {}", kind, n, pos);
        Some(self.items.remove(pos))
    }

    /// Remove every item of `kind`, returning how many were removed
    pub fn remove_all(&mut self, kind: T::Kind) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.kind() != kind);
        before - self.items.len()
    }

    /// Append an existing item at the end of the sequence
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Total number of items of all kinds
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all items in document order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate over the items of one kind in document order
    pub fn iter_of_kind(&self, kind: T::Kind) -> impl Iterator<Item = &T> {
        self.items.iter().filter(move |item| item.kind() == kind)
    }

    /// Kinds of all items in document order
    pub fn kinds(&self) -> Vec<T::Kind> {
        self.items.iter().map(|item| item.kind()).collect()
    }

    /// Render all items in document order
    pub fn to_nodes(&self) -> Vec<XmlNode> {
        self.items.iter().map(|item| item.to_node()).collect()
    }

    /// Write all items in document order
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        for item in &self.items {
            item.to_node().write_to(writer)?;
        }
        Ok(())
    }
}

impl<T: ChoiceItem> FromIterator<T> for ChoiceSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ChoiceSequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A three-kind group used to exercise the container on its own
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shape {
        Circle,
        Square,
        Line,
    }

    impl ChoiceKind for Shape {
        const ALL: &'static [Self] = &[Shape::Circle, Shape::Square, Shape::Line];

        fn element_name(self) -> &'static str {
            match self {
                Shape::Circle => "g:circle",
                Shape::Square => "g:square",
                Shape::Line => "g:line",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Item {
        Circle(u32),
        Square(u32),
        Line(u32),
    }

    impl ChoiceItem for Item {
        type Kind = Shape;

        fn kind(&self) -> Shape {
            match self {
                Item::Circle(_) => Shape::Circle,
                Item::Square(_) => Shape::Square,
                Item::Line(_) => Shape::Line,
            }
        }

        fn new_of_kind(kind: Shape) -> Self {
            match kind {
                Shape::Circle => Item::Circle(0),
                Shape::Square => Item::Square(0),
                Shape::Line => Item::Line(0),
            }
        }

        fn from_node(kind: Shape, node: &XmlNode) -> Result<Self> {
            let size = node
                .attr("size")
                .unwrap_or("0")
                .parse()
                .map_err(|_| WmlError::invalid_value("size", node.attr("size").unwrap_or("")))?;
            Ok(match kind {
                Shape::Circle => Item::Circle(size),
                Shape::Square => Item::Square(size),
                Shape::Line => Item::Line(size),
            })
        }

        fn to_node(&self) -> XmlNode {
            let size = match self {
                Item::Circle(s) | Item::Square(s) | Item::Line(s) => *s,
            };
            XmlNode::new(self.kind().element_name()).with_attr("size", size.to_string())
        }
    }

    fn sample() -> ChoiceSequence<Item> {
        vec![
            Item::Circle(1),
            Item::Square(2),
            Item::Circle(3),
            Item::Line(4),
            Item::Square(5),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_from_element_name_ignores_prefix() {
        assert_eq!(Shape::from_element_name("g:circle"), Some(Shape::Circle));
        assert_eq!(Shape::from_element_name("square"), Some(Shape::Square));
        assert_eq!(Shape::from_element_name("x:line"), Some(Shape::Line));
        assert_eq!(Shape::from_element_name("triangle"), None);
    }

    #[test]
    fn test_position_of() {
        let seq = sample();
        assert_eq!(seq.position_of(Shape::Circle, 0), Some(0));
        assert_eq!(seq.position_of(Shape::Circle, 1), Some(2));
        assert_eq!(seq.position_of(Shape::Square, 1), Some(4));
        assert_eq!(seq.position_of(Shape::Line, 1), None);
    }

    #[test]
    fn test_count_and_get() {
        let seq = sample();
        assert_eq!(seq.count_of_kind(Shape::Circle), 2);
        assert_eq!(seq.count_of_kind(Shape::Line), 1);
        assert_eq!(seq.get_at(Shape::Square, 1), Some(&Item::Square(5)));
        assert_eq!(seq.get_at(Shape::Square, 2), None);
    }

    #[test]
    fn test_append_new_returns_fresh_item() {
        let mut seq = sample();
        if let Item::Line(size) = seq.append_new(Shape::Line) {
            *size = 9;
        }
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.get_at(Shape::Line, 1), Some(&Item::Line(9)));
    }

    #[test]
    fn test_insert_new_before_nth() {
        let mut seq = sample();
        assert!(seq.insert_new(Shape::Circle, 1).is_some());
        assert_eq!(
            seq.kinds(),
            vec![
                Shape::Circle,
                Shape::Square,
                Shape::Circle,
                Shape::Circle,
                Shape::Line,
                Shape::Square
            ]
        );
        assert_eq!(seq.get_at(Shape::Circle, 1), Some(&Item::Circle(0)));
        assert_eq!(seq.get_at(Shape::Circle, 2), Some(&Item::Circle(3)));
    }

    #[test]
    fn test_insert_new_at_count_appends() {
        let mut seq = sample();
        seq.insert_new(Shape::Line, 1).unwrap();
        assert_eq!(seq.kinds().last(), Some(&Shape::Line));
        assert_eq!(seq.len(), 6);
    }

    #[test]
    fn test_insert_new_into_absent_kind() {
        let mut seq: ChoiceSequence<Item> = vec![Item::Square(1)].into_iter().collect();
        seq.insert_new(Shape::Circle, 0).unwrap();
        assert_eq!(seq.kinds(), vec![Shape::Square, Shape::Circle]);
    }

    #[test]
    fn test_insert_new_out_of_range_is_noop() {
        let mut seq = sample();
        assert!(seq.insert_new(Shape::Line, 2).is_none());
        assert_eq!(seq, sample());
    }

    #[test]
    fn test_replace() {
        let mut seq = sample();
        let old = seq.replace(Shape::Circle, 1, Item::Circle(30)).unwrap();
        assert_eq!(old, Some(Item::Circle(3)));
        assert_eq!(seq.position_of(Shape::Circle, 1), Some(2));
        assert_eq!(seq.get_at(Shape::Circle, 1), Some(&Item::Circle(30)));

        let missing = seq.replace(Shape::Circle, 5, Item::Circle(1)).unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_replace_kind_mismatch() {
        let mut seq = sample();
        let err = seq.replace(Shape::Circle, 0, Item::Square(7)).unwrap_err();
        match err {
            WmlError::KindMismatch { expected, found } => {
                assert_eq!(expected, "g:circle");
                assert_eq!(found, "g:square");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(seq, sample());
    }

    #[test]
    fn test_remove_at() {
        let mut seq = sample();
        assert_eq!(seq.remove_at(Shape::Square, 0), Some(Item::Square(2)));
        assert_eq!(
            seq.kinds(),
            vec![Shape::Circle, Shape::Circle, Shape::Line, Shape::Square]
        );
        assert_eq!(seq.remove_at(Shape::Square, 1), None);
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_remove_all() {
        let mut seq = sample();
        assert_eq!(seq.remove_all(Shape::Circle), 2);
        assert_eq!(seq.count_of_kind(Shape::Circle), 0);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_iter_of_kind() {
        let seq = sample();
        let squares: Vec<_> = seq.iter_of_kind(Shape::Square).collect();
        assert_eq!(squares, vec![&Item::Square(2), &Item::Square(5)]);
    }

    #[test]
    fn test_parse_skips_unknown_and_keeps_order() {
        let node = XmlNode::parse(
            br#"<g:group><g:line size="1"/><g:triangle/><g:circle size="2"/>text<g:line size="3"/></g:group>"#,
        )
        .unwrap();
        let seq = ChoiceSequence::<Item>::parse_children(&node).unwrap();
        assert_eq!(
            seq.iter().cloned().collect::<Vec<_>>(),
            vec![Item::Line(1), Item::Circle(2), Item::Line(3)]
        );
    }

    #[test]
    fn test_parse_empty() {
        let node = XmlNode::parse(b"<g:group><g:hexagon/></g:group>").unwrap();
        let seq = ChoiceSequence::<Item>::parse_children(&node).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_parse_propagates_item_errors() {
        let node = XmlNode::parse(br#"<g:group><g:circle size="big"/></g:group>"#).unwrap();
        assert!(ChoiceSequence::<Item>::parse_children(&node).is_err());
    }

    #[test]
    fn test_write_in_document_order() {
        let seq = sample();
        let mut writer = Writer::new(Vec::new());
        seq.write_to(&mut writer).unwrap();
        let xml = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<g:circle size="1"/><g:square size="2"/><g:circle size="3"/>"#,
                r#"<g:line size="4"/><g:square size="5"/>"#
            )
        );
    }
}
