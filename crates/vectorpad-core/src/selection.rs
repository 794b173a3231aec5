//! Selection model and manipulation handles.

use crate::document::{Action, Document};
use crate::geometry::segment_midpoint;
use crate::shapes::{Item, ItemId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How locked items interact with selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    /// Locked items can be selected but never moved, resized or vertex-edited.
    #[default]
    SelectableButFixed,
    /// Locked items are skipped by click-to-select.
    Unselectable,
}

/// Which handle set the selection shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionKind {
    /// Resize handles on the bounding box.
    #[default]
    Bbox,
    /// Vertex and insert handles on a single polyline/polygon.
    Vertices,
}

/// Selection state that is not stored in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMeta {
    pub kind: SelectionKind,
    pub active_vertex: Option<usize>,
}

/// The selected items, in selection order, plus the meta state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    items: Vec<Item>,
    pub meta: SelectionMeta,
}

impl Selection {
    /// Build the selection view from the document's selected ids.
    pub fn derive(doc: &Document, meta: SelectionMeta) -> Self {
        let items = doc
            .sids()
            .iter()
            .filter_map(|id| doc.item(*id))
            .cloned()
            .collect();
        Self { items, meta }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(Item::id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// The only selected item, if exactly one is selected.
    pub fn single(&self) -> Option<&Item> {
        match self.items.as_slice() {
            [item] => Some(item),
            _ => None,
        }
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(Item::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    pub fn any_locked(&self) -> bool {
        self.items.iter().any(Item::locked)
    }
}

/// A request to change the selection, resolved by the editor after the
/// current event's document actions have been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    /// Select exactly this item. Vertex-bearing items open in vertex mode.
    SelectItem(ItemId),
    /// Select the most recently added item with the given handle kind.
    SelectLast(SelectionKind),
    /// Replace the selection with these ids (bounding-box mode).
    Replace(Vec<ItemId>),
    Clear,
    /// Switch between bounding-box and vertex handles for the current selection.
    ToggleKind,
    ActiveVertex(Option<usize>),
}

impl SelectionChange {
    /// Turn this change into document actions and the next meta state.
    pub fn resolve(&self, doc: &Document, meta: SelectionMeta) -> (Vec<Action>, SelectionMeta) {
        match self {
            SelectionChange::SelectItem(id) => match doc.item(*id) {
                Some(item) => {
                    let kind = if item.vertices().is_some() {
                        SelectionKind::Vertices
                    } else {
                        SelectionKind::Bbox
                    };
                    (
                        vec![Action::UpdateSids(vec![*id])],
                        SelectionMeta {
                            kind,
                            active_vertex: None,
                        },
                    )
                }
                None => (Vec::new(), meta),
            },
            SelectionChange::SelectLast(kind) => match doc.items().keys().next_back() {
                Some(id) => (
                    vec![Action::UpdateSids(vec![*id])],
                    SelectionMeta {
                        kind: *kind,
                        active_vertex: None,
                    },
                ),
                None => (Vec::new(), meta),
            },
            SelectionChange::Replace(ids) => (
                vec![Action::UpdateSids(ids.clone())],
                SelectionMeta::default(),
            ),
            SelectionChange::Clear => (vec![Action::ClearSids], SelectionMeta::default()),
            SelectionChange::ToggleKind => {
                let single_vertex_item = match doc.sids() {
                    [id] => doc.item(*id).is_some_and(|item| item.vertices().is_some()),
                    _ => false,
                };
                let kind = match meta.kind {
                    SelectionKind::Bbox if single_vertex_item => SelectionKind::Vertices,
                    _ => SelectionKind::Bbox,
                };
                (
                    Vec::new(),
                    SelectionMeta {
                        kind,
                        active_vertex: None,
                    },
                )
            }
            SelectionChange::ActiveVertex(index) => (
                Vec::new(),
                SelectionMeta {
                    active_vertex: *index,
                    ..meta
                },
            ),
        }
    }
}

/// Click-to-select: the frontmost item under `point`, honouring the lock policy.
pub fn pick(doc: &Document, point: Point, tolerance: f64, policy: LockPolicy) -> Option<ItemId> {
    doc.zlist().iter().rev().copied().find(|id| {
        doc.item(*id).is_some_and(|item| {
            let selectable = !(item.locked() && policy == LockPolicy::Unselectable);
            selectable && item.hit_test(point, tolerance)
        })
    })
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// One of the eight resize handles on a selection bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(Edge),
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Corner(Corner::TopLeft),
        ResizeHandle::Edge(Edge::Top),
        ResizeHandle::Corner(Corner::TopRight),
        ResizeHandle::Edge(Edge::Right),
        ResizeHandle::Corner(Corner::BottomRight),
        ResizeHandle::Edge(Edge::Bottom),
        ResizeHandle::Corner(Corner::BottomLeft),
        ResizeHandle::Edge(Edge::Left),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::Corner(Corner::TopLeft) => "top-left",
            ResizeHandle::Corner(Corner::TopRight) => "top-right",
            ResizeHandle::Corner(Corner::BottomLeft) => "bottom-left",
            ResizeHandle::Corner(Corner::BottomRight) => "bottom-right",
            ResizeHandle::Edge(Edge::Top) => "top",
            ResizeHandle::Edge(Edge::Right) => "right",
            ResizeHandle::Edge(Edge::Bottom) => "bottom",
            ResizeHandle::Edge(Edge::Left) => "left",
        }
    }

    /// Handle position on `bounds`.
    pub fn position(&self, bounds: Rect) -> Point {
        let c = bounds.center();
        match self {
            ResizeHandle::Corner(Corner::TopLeft) => Point::new(bounds.x0, bounds.y0),
            ResizeHandle::Corner(Corner::TopRight) => Point::new(bounds.x1, bounds.y0),
            ResizeHandle::Corner(Corner::BottomLeft) => Point::new(bounds.x0, bounds.y1),
            ResizeHandle::Corner(Corner::BottomRight) => Point::new(bounds.x1, bounds.y1),
            ResizeHandle::Edge(Edge::Top) => Point::new(c.x, bounds.y0),
            ResizeHandle::Edge(Edge::Right) => Point::new(bounds.x1, c.y),
            ResizeHandle::Edge(Edge::Bottom) => Point::new(c.x, bounds.y1),
            ResizeHandle::Edge(Edge::Left) => Point::new(bounds.x0, c.y),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            ResizeHandle::Corner(Corner::TopLeft) => ResizeHandle::Corner(Corner::BottomRight),
            ResizeHandle::Corner(Corner::TopRight) => ResizeHandle::Corner(Corner::BottomLeft),
            ResizeHandle::Corner(Corner::BottomLeft) => ResizeHandle::Corner(Corner::TopRight),
            ResizeHandle::Corner(Corner::BottomRight) => ResizeHandle::Corner(Corner::TopLeft),
            ResizeHandle::Edge(Edge::Top) => ResizeHandle::Edge(Edge::Bottom),
            ResizeHandle::Edge(Edge::Right) => ResizeHandle::Edge(Edge::Left),
            ResizeHandle::Edge(Edge::Bottom) => ResizeHandle::Edge(Edge::Top),
            ResizeHandle::Edge(Edge::Left) => ResizeHandle::Edge(Edge::Right),
        }
    }

    /// Which axes this handle scales: `(x, y)`.
    pub fn axes(&self) -> (bool, bool) {
        match self {
            ResizeHandle::Corner(_) => (true, true),
            ResizeHandle::Edge(Edge::Top | Edge::Bottom) => (false, true),
            ResizeHandle::Edge(Edge::Left | Edge::Right) => (true, false),
        }
    }

    /// The fixed anchor (opposite handle) and the drag start (this handle).
    pub fn anchor_and_start(&self, bounds: Rect) -> (Point, Point) {
        (self.opposite().position(bounds), self.position(bounds))
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a resize handle name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown resize handle: {0}")]
pub struct UnknownHandle(pub String);

impl FromStr for ResizeHandle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| UnknownHandle(s.to_string()))
    }
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Resize(ResizeHandle),
    /// Existing vertex of a polyline/polygon.
    Vertex { item: ItemId, index: usize },
    /// Segment midpoint; dragging it inserts a vertex at `index`.
    InsertVertex { item: ItemId, index: usize },
}

/// Visual shape of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleShape {
    #[default]
    Square,
    Circle,
    Diamond,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in document coordinates.
    pub position: Point,
    pub kind: HandleKind,
    pub shape: HandleShape,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        let shape = match kind {
            HandleKind::Resize(_) => HandleShape::Square,
            HandleKind::Vertex { .. } => HandleShape::Circle,
            HandleKind::InsertVertex { .. } => HandleShape::Diamond,
        };
        Self {
            position,
            kind,
            shape,
        }
    }

    /// Check if a point (in document coordinates) hits this handle.
    /// `tolerance` should already be divided by the zoom factor.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Handles for the current selection.
pub fn get_handles(selection: &Selection) -> Vec<Handle> {
    match selection.meta.kind {
        SelectionKind::Vertices => match selection.single() {
            Some(item) => vertex_handles(item),
            None => Vec::new(),
        },
        SelectionKind::Bbox => match selection.bounds() {
            Some(bounds) => ResizeHandle::ALL
                .into_iter()
                .map(|h| Handle::new(h.position(bounds), HandleKind::Resize(h)))
                .collect(),
            None => Vec::new(),
        },
    }
}

fn vertex_handles(item: &Item) -> Vec<Handle> {
    let Some(points) = item.vertices() else {
        return Vec::new();
    };
    let id = item.id();
    let mut handles: Vec<Handle> = points
        .iter()
        .enumerate()
        .map(|(index, p)| Handle::new(*p, HandleKind::Vertex { item: id, index }))
        .collect();

    let n = points.len();
    let segment_count = if item.is_closed() && n > 2 { n } else { n.saturating_sub(1) };
    for i in 0..segment_count {
        let mid = segment_midpoint(points[i], points[(i + 1) % n]);
        handles.push(Handle::new(
            mid,
            HandleKind::InsertVertex {
                item: id,
                index: i + 1,
            },
        ));
    }
    handles
}

/// Find the closest handle within `tolerance` of `point`.
pub fn hit_test_handles(handles: &[Handle], point: Point, tolerance: f64) -> Option<HandleKind> {
    handles
        .iter()
        .filter(|h| h.hit_test(point, tolerance))
        .min_by(|a, b| {
            let da = (a.position - point).hypot2();
            let db = (b.position - point).hypot2();
            da.total_cmp(&db)
        })
        .map(|h| h.kind)
}
