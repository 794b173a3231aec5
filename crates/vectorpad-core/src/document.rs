//! Document state and the actions that update it.
//!
//! The document is only ever changed by folding [`Action`]s over it, starting
//! from [`Document::initial`]. Each action is a total function: malformed
//! arguments (unknown ids, out-of-range vertex indices) leave the document as
//! it was.

use crate::geometry::coordinate_updater;
use crate::shapes::{Item, ItemId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// A broken structural invariant of a [`Document`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("Stacking order {zlist:?} is not a permutation of {keys:?}")]
    StackingOrder { zlist: Vec<ItemId>, keys: Vec<ItemId> },
    #[error("Selected id {0} has no item")]
    DanglingSelection(ItemId),
    #[error("Selected id {0} appears twice")]
    DuplicateSelection(ItemId),
    #[error("Item stored under {key} reports id {id}")]
    IdMismatch { key: ItemId, id: ItemId },
    #[error("Item {key} is above last id {last_id}")]
    AboveLastId { key: ItemId, last_id: ItemId },
}

/// A geometry change applied to a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeometryPatch {
    /// Move every point by a delta.
    Translate(Vec2),
    /// Scale relative to `anchor` so that `start` lands on `end`. Axes with a
    /// `false` flag are left untouched.
    Resize {
        anchor: Point,
        start: Point,
        end: Point,
        scale_x: bool,
        scale_y: bool,
    },
    MoveVertex { index: usize, to: Point },
    InsertVertex { index: usize, at: Point },
    RemoveVertex { index: usize },
}

impl GeometryPatch {
    /// Apply the patch to an item in place.
    pub fn apply_to(&self, item: &mut Item) {
        match self {
            GeometryPatch::Translate(delta) => item.translate(*delta),
            GeometryPatch::Resize {
                anchor,
                start,
                end,
                scale_x,
                scale_y,
            } => {
                let fx = coordinate_updater(anchor.x, start.x, end.x);
                let fy = coordinate_updater(anchor.y, start.y, end.y);
                let (sx, sy) = (*scale_x, *scale_y);
                item.map_points(&|p| {
                    Point::new(
                        if sx { fx(p.x) } else { p.x },
                        if sy { fy(p.y) } else { p.y },
                    )
                });
            }
            GeometryPatch::MoveVertex { index, to } => {
                item.move_vertex(*index, *to);
            }
            GeometryPatch::InsertVertex { index, at } => {
                item.insert_vertex(*index, *at);
            }
            GeometryPatch::RemoveVertex { index } => {
                item.remove_vertex(*index);
            }
        }
    }
}

/// A pure document update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Insert an item under a fresh id, on top of the stacking order.
    AddItem(Item),
    /// Replace the selection. Unknown ids are dropped, duplicates collapsed.
    UpdateSids(Vec<ItemId>),
    ClearSids,
    RemoveItem(ItemId),
    UpdateItemGeometry(ItemId, GeometryPatch),
    SetLocked(ItemId, bool),
    BringToFront(ItemId),
    SendToBack(ItemId),
}

impl Action {
    /// Apply this action, producing the next document.
    pub fn apply(&self, mut doc: Document) -> Document {
        match self {
            Action::AddItem(item) => {
                let id = doc.next_id();
                let mut item = item.clone();
                item.set_id(id);
                doc.items.insert(id, item);
                doc.zlist.push(id);
                doc.last_id = id;
            }
            Action::UpdateSids(ids) => {
                let mut seen = HashSet::new();
                doc.sids = ids
                    .iter()
                    .copied()
                    .filter(|id| doc.items.contains_key(id) && seen.insert(*id))
                    .collect();
            }
            Action::ClearSids => doc.sids.clear(),
            Action::RemoveItem(id) => {
                if doc.items.remove(id).is_some() {
                    doc.zlist.retain(|z| z != id);
                    doc.sids.retain(|s| s != id);
                }
            }
            Action::UpdateItemGeometry(id, patch) => {
                if let Some(item) = doc.items.get_mut(id) {
                    if item.locked() {
                        log::debug!("ignoring geometry update on locked item {id}");
                    } else {
                        patch.apply_to(item);
                    }
                }
            }
            Action::SetLocked(id, locked) => {
                if let Some(item) = doc.items.get_mut(id) {
                    item.set_locked(*locked);
                }
            }
            Action::BringToFront(id) => {
                if doc.items.contains_key(id) {
                    doc.zlist.retain(|z| z != id);
                    doc.zlist.push(*id);
                }
            }
            Action::SendToBack(id) => {
                if doc.items.contains_key(id) {
                    doc.zlist.retain(|z| z != id);
                    doc.zlist.insert(0, *id);
                }
            }
        }
        doc
    }
}

/// Fold a sequence of actions over a document, left to right.
pub fn fold<'a>(doc: Document, actions: impl IntoIterator<Item = &'a Action>) -> Document {
    actions.into_iter().fold(doc, |doc, action| action.apply(doc))
}

/// The authoritative drawing state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    items: BTreeMap<ItemId, Item>,
    /// Stacking order, back to front.
    zlist: Vec<ItemId>,
    /// Selected ids, in selection order.
    sids: Vec<ItemId>,
    /// Highest id ever handed out; ids are never reused.
    last_id: ItemId,
}

impl Document {
    /// The empty starting document.
    pub fn initial() -> Self {
        Self::default()
    }

    fn next_id(&self) -> ItemId {
        let max_existing = self.items.keys().next_back().copied().unwrap_or(0);
        self.last_id.max(max_existing) + 1
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn items(&self) -> &BTreeMap<ItemId, Item> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn zlist(&self) -> &[ItemId] {
        &self.zlist
    }

    pub fn sids(&self) -> &[ItemId] {
        &self.sids
    }

    pub fn last_id(&self) -> ItemId {
        self.last_id
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.sids.contains(&id)
    }

    /// Items in stacking order, back to front.
    pub fn items_ordered(&self) -> impl Iterator<Item = &Item> {
        self.zlist.iter().filter_map(|id| self.items.get(id))
    }

    /// Ids of items hit at `point`, front to back.
    pub fn items_at_point(&self, point: Point, tolerance: f64) -> Vec<ItemId> {
        self.zlist
            .iter()
            .rev()
            .copied()
            .filter(|id| {
                self.items
                    .get(id)
                    .is_some_and(|item| item.hit_test(point, tolerance))
            })
            .collect()
    }

    /// The frontmost item hit at `point`, if any.
    pub fn topmost_at(&self, point: Point, tolerance: f64) -> Option<ItemId> {
        self.zlist.iter().rev().copied().find(|id| {
            self.items
                .get(id)
                .is_some_and(|item| item.hit_test(point, tolerance))
        })
    }

    /// Union of all item bounds.
    pub fn bounds(&self) -> Option<Rect> {
        union_bounds(self.items.values())
    }

    /// Union of the selected items' bounds.
    pub fn selection_bounds(&self) -> Option<Rect> {
        union_bounds(self.sids.iter().filter_map(|id| self.items.get(id)))
    }

    /// Check the structural invariants, reporting the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut z: Vec<ItemId> = self.zlist.clone();
        z.sort_unstable();
        let keys: Vec<ItemId> = self.items.keys().copied().collect();
        if z != keys {
            return Err(InvariantError::StackingOrder {
                zlist: self.zlist.clone(),
                keys,
            });
        }
        let mut seen = HashSet::new();
        for id in &self.sids {
            if !self.items.contains_key(id) {
                return Err(InvariantError::DanglingSelection(*id));
            }
            if !seen.insert(*id) {
                return Err(InvariantError::DuplicateSelection(*id));
            }
        }
        for (key, item) in &self.items {
            if *key != item.id() {
                return Err(InvariantError::IdMismatch {
                    key: *key,
                    id: item.id(),
                });
            }
            if *key > self.last_id {
                return Err(InvariantError::AboveLastId {
                    key: *key,
                    last_id: self.last_id,
                });
            }
        }
        Ok(())
    }
}

fn union_bounds<'a>(items: impl Iterator<Item = &'a Item>) -> Option<Rect> {
    items.map(Item::bounds).reduce(|acc, b| acc.union(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Polygon, Polyline, Rectangle};
    use proptest::prelude::*;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Item {
        Item::Rect(Rectangle::new(Point::new(x, y), w, h))
    }

    fn doc_with(items: Vec<Item>) -> Document {
        items
            .into_iter()
            .fold(Document::initial(), |d, item| Action::AddItem(item).apply(d))
    }

    #[test]
    fn test_add_item_assigns_ids_from_one() {
        let doc = doc_with(vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 1.0, 1.0)]);
        assert_eq!(doc.zlist(), &[1, 2]);
        assert_eq!(doc.item(2).map(Item::id), Some(2));
        assert!(doc.check_invariants().is_ok());
    }

    #[test]
    fn test_invariant_violations_reported() {
        let doc = doc_with(vec![rect(0.0, 0.0, 1.0, 1.0)]);

        let mut broken = doc.clone();
        broken.zlist.clear();
        assert_eq!(
            broken.check_invariants(),
            Err(InvariantError::StackingOrder {
                zlist: vec![],
                keys: vec![1],
            })
        );

        let mut broken = doc.clone();
        broken.sids = vec![1, 1];
        assert_eq!(broken.check_invariants(), Err(InvariantError::DuplicateSelection(1)));

        let mut broken = doc.clone();
        broken.sids = vec![7];
        assert_eq!(broken.check_invariants(), Err(InvariantError::DanglingSelection(7)));

        let mut broken = doc;
        broken.last_id = 0;
        assert_eq!(
            broken.check_invariants(),
            Err(InvariantError::AboveLastId { key: 1, last_id: 0 })
        );
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let doc = doc_with(vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 1.0, 1.0)]);
        let doc = Action::RemoveItem(2).apply(doc);
        let doc = Action::AddItem(rect(0.0, 0.0, 2.0, 2.0)).apply(doc);
        assert_eq!(doc.zlist(), &[1, 3]);
    }

    #[test]
    fn test_clear_sids_idempotent() {
        let doc = doc_with(vec![rect(0.0, 0.0, 1.0, 1.0)]);
        let doc = Action::UpdateSids(vec![1]).apply(doc);
        let once = Action::ClearSids.apply(doc);
        let twice = Action::ClearSids.apply(once.clone());
        assert_eq!(once, twice);
        assert!(once.sids().is_empty());
    }

    #[test]
    fn test_update_sids_filters() {
        let doc = doc_with(vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 1.0, 1.0)]);
        let doc = Action::UpdateSids(vec![2, 9, 2, 1]).apply(doc);
        assert_eq!(doc.sids(), &[2, 1]);
    }

    #[test]
    fn test_remove_clears_selection_and_zlist() {
        let doc = doc_with(vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 1.0, 1.0)]);
        let doc = Action::UpdateSids(vec![1, 2]).apply(doc);
        let doc = Action::RemoveItem(1).apply(doc);
        assert_eq!(doc.sids(), &[2]);
        assert_eq!(doc.zlist(), &[2]);
        // Unknown id is a no-op.
        let again = Action::RemoveItem(42).apply(doc.clone());
        assert_eq!(again, doc);
    }

    #[test]
    fn test_resize_anchor_law() {
        let doc = doc_with(vec![rect(0.0, 0.0, 10.0, 10.0)]);
        let doc = Action::UpdateItemGeometry(
            1,
            GeometryPatch::Resize {
                anchor: Point::new(0.0, 0.0),
                start: Point::new(10.0, 10.0),
                end: Point::new(20.0, 30.0),
                scale_x: true,
                scale_y: true,
            },
        )
        .apply(doc);
        assert_eq!(doc.item(1).map(Item::bounds), Some(Rect::new(0.0, 0.0, 20.0, 30.0)));
    }

    #[test]
    fn test_resize_single_axis() {
        let doc = doc_with(vec![rect(0.0, 0.0, 10.0, 10.0)]);
        let doc = Action::UpdateItemGeometry(
            1,
            GeometryPatch::Resize {
                anchor: Point::new(0.0, 5.0),
                start: Point::new(10.0, 5.0),
                end: Point::new(15.0, 40.0),
                scale_x: true,
                scale_y: false,
            },
        )
        .apply(doc);
        assert_eq!(doc.item(1).map(Item::bounds), Some(Rect::new(0.0, 0.0, 15.0, 10.0)));
    }

    #[test]
    fn test_locked_item_ignores_geometry() {
        let doc = doc_with(vec![rect(0.0, 0.0, 10.0, 10.0)]);
        let doc = Action::SetLocked(1, true).apply(doc);
        let before = doc.clone();
        let doc = Action::UpdateItemGeometry(1, GeometryPatch::Translate(Vec2::new(5.0, 5.0)))
            .apply(doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_vertex_patches() {
        let doc = doc_with(vec![Item::Polyline(Polyline::line_from_points(
            Point::ZERO,
            Point::new(10.0, 0.0),
        ))]);
        let doc = Action::UpdateItemGeometry(
            1,
            GeometryPatch::InsertVertex {
                index: 1,
                at: Point::new(5.0, 5.0),
            },
        )
        .apply(doc);
        assert_eq!(doc.item(1).and_then(Item::vertices).map(<[Point]>::len), Some(3));
        let remove = |index| Action::UpdateItemGeometry(1, GeometryPatch::RemoveVertex { index });
        let doc = remove(1).apply(doc);
        let doc = remove(0).apply(doc);
        // A line keeps at least two points.
        assert_eq!(doc.item(1).and_then(Item::vertices).map(<[Point]>::len), Some(2));
    }

    #[test]
    fn test_z_order_and_hit() {
        let doc = doc_with(vec![rect(0.0, 0.0, 10.0, 10.0), rect(5.0, 5.0, 10.0, 10.0)]);
        assert_eq!(doc.topmost_at(Point::new(7.0, 7.0), 0.0), Some(2));
        assert_eq!(doc.items_at_point(Point::new(7.0, 7.0), 0.0), vec![2, 1]);
        let doc = Action::SendToBack(2).apply(doc);
        assert_eq!(doc.topmost_at(Point::new(7.0, 7.0), 0.0), Some(1));
        let doc = Action::BringToFront(2).apply(doc);
        assert_eq!(doc.zlist(), &[1, 2]);
        assert_eq!(doc.topmost_at(Point::new(50.0, 50.0), 0.0), None);
    }

    #[test]
    fn test_selection_bounds() {
        let doc = doc_with(vec![rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 20.0, 5.0, 5.0)]);
        assert_eq!(doc.selection_bounds(), None);
        let doc = Action::UpdateSids(vec![1, 2]).apply(doc);
        assert_eq!(doc.selection_bounds(), Some(Rect::new(0.0, 0.0, 25.0, 25.0)));
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        prop_oneof![
            (0.0f64..100.0, 0.0f64..100.0, 1.0f64..50.0, 1.0f64..50.0)
                .prop_map(|(x, y, w, h)| rect(x, y, w, h)),
            (0.0f64..100.0, 0.0f64..100.0).prop_map(|(x, y)| {
                Item::Polygon(Polygon::from_points(vec![
                    Point::new(x, y),
                    Point::new(x + 10.0, y),
                    Point::new(x, y + 10.0),
                ]))
            }),
        ]
    }

    fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            arb_item().prop_map(Action::AddItem),
            proptest::collection::vec(0u64..12, 0..4).prop_map(Action::UpdateSids),
            Just(Action::ClearSids),
            (0u64..12).prop_map(Action::RemoveItem),
            (0u64..12, -5.0f64..5.0, -5.0f64..5.0).prop_map(|(id, dx, dy)| {
                Action::UpdateItemGeometry(id, GeometryPatch::Translate(Vec2::new(dx, dy)))
            }),
            (0u64..12, 0usize..5).prop_map(|(id, index)| {
                Action::UpdateItemGeometry(id, GeometryPatch::RemoveVertex { index })
            }),
            (0u64..12, any::<bool>()).prop_map(|(id, l)| Action::SetLocked(id, l)),
            (0u64..12).prop_map(Action::BringToFront),
            (0u64..12).prop_map(Action::SendToBack),
        ]
    }

    proptest! {
        #[test]
        fn prop_ids_unique_and_increasing(items in proptest::collection::vec(arb_item(), 1..20)) {
            let mut doc = Document::initial();
            let mut ids = Vec::new();
            for item in items {
                doc = Action::AddItem(item).apply(doc);
                ids.push(doc.last_id());
            }
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(doc.len(), ids.len());
        }

        #[test]
        fn prop_invariants_preserved(actions in proptest::collection::vec(arb_action(), 0..40)) {
            let mut doc = Document::initial();
            let mut last = 0;
            for action in &actions {
                doc = action.apply(doc);
                prop_assert!(doc.check_invariants().is_ok(), "{:?}", doc.check_invariants());
                prop_assert!(doc.last_id() >= last);
                last = doc.last_id();
            }
        }
    }
}
