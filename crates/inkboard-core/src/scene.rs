//! Scene model: the live document and its history.

use crate::element::{Background, Element, ElementId, ElementKind, ElementUpdate};
use crate::geometry::{self, bounding_box};
use crate::history::{History, MAX_UNDO_HISTORY};
use crate::storage::DocumentSnapshot;
use kurbo::{Point, Size, Vec2};
use std::collections::HashSet;

/// Default canvas size for new documents.
pub const DEFAULT_CANVAS_SIZE: Size = Size::new(1280.0, 720.0);
/// Minimum distance from the canvas edge for newly placed elements.
pub const DEFAULT_PLACEMENT_MARGIN: f64 = 40.0;

/// The live document: elements in paint order, selection, canvas settings,
/// and the undo history.
///
/// All writes go through the methods below. Methods documented as
/// *recorded* push a snapshot of the element sequence before changing it;
/// the others leave history untouched.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Elements back to front.
    elements: Vec<Element>,
    selected_id: Option<ElementId>,
    canvas_size: Size,
    background: Background,
    placement_margin: f64,
    history: History,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with default settings.
    pub fn new() -> Self {
        Self::with_settings(
            DEFAULT_CANVAS_SIZE,
            Background::default(),
            DEFAULT_PLACEMENT_MARGIN,
            MAX_UNDO_HISTORY,
        )
    }

    pub fn with_settings(
        canvas_size: Size,
        background: Background,
        placement_margin: f64,
        history_limit: usize,
    ) -> Self {
        Self {
            elements: Vec::new(),
            selected_id: None,
            canvas_size,
            background,
            placement_margin,
            history: History::with_limit(history_limit),
        }
    }

    // ---- Reads ----

    /// Elements in paint order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected_id.as_ref()
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selected_id.as_ref().and_then(|id| self.element(id))
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Topmost unlocked element whose bounds contain `point`.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        self.elements.iter().rev().find(|e| {
            !e.locked
                && bounding_box(e).is_some_and(|b| geometry::point_in_padded_box(point, b, 0.0))
        })
    }

    // ---- Recorded mutations ----

    /// Add an element of `kind` built from its defaults, centered on the
    /// canvas, with `overrides` applied on top. The new element becomes the
    /// front-most one and is selected.
    pub fn add_element(&mut self, kind: ElementKind, overrides: &ElementUpdate) -> Element {
        let mut element = Element::from_kind(kind);
        if let Some(bounds) = bounding_box(&element) {
            let origin =
                geometry::centered_origin(self.canvas_size, bounds.size(), self.placement_margin);
            element.x = origin.x;
            element.y = origin.y;
        }
        overrides.apply_to(&mut element);

        self.history.record(&self.elements);
        log::debug!("Adding {} element {}", kind, element.id());
        self.selected_id = Some(element.id().clone());
        self.elements.push(element.clone());
        element
    }

    /// Merge `updates` into the element with `id`.
    ///
    /// Every call on an existing element is one recorded step, even when the
    /// values are unchanged. Unknown ids record nothing.
    pub fn update_element(&mut self, id: &ElementId, updates: &ElementUpdate) {
        let Some(index) = self.index_of(id) else {
            log::debug!("update_element: no element {}", id);
            return;
        };

        self.history.record(&self.elements);
        updates.apply_to(&mut self.elements[index]);
    }

    /// Remove the element with `id`, clearing the selection if it pointed
    /// at it.
    pub fn delete_element(&mut self, id: &ElementId) {
        let Some(index) = self.index_of(id) else {
            log::debug!("delete_element: no element {}", id);
            return;
        };

        self.history.record(&self.elements);
        self.elements.remove(index);
        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
    }

    /// Move an element one layer towards the front.
    /// Returns true if the element was moved.
    pub fn bring_forward(&mut self, id: &ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos + 1 < self.elements.len() => {
                self.history.record(&self.elements);
                self.elements.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Move an element one layer towards the back.
    /// Returns true if the element was moved.
    pub fn send_backward(&mut self, id: &ElementId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => {
                self.history.record(&self.elements);
                self.elements.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    /// Replace the whole element sequence (layout or palette changes).
    pub fn replace_elements(&mut self, elements: Vec<Element>) {
        self.history.record(&self.elements);
        self.elements = dedupe_ids(elements);
        self.selected_id = None;
    }

    // ---- Transient mutations (no history) ----

    /// Merge `updates` without recording history.
    ///
    /// For high-frequency updates during a drag or stroke; the state before
    /// the gesture is captured by whichever recorded call started or ends it.
    pub fn mutate_element(&mut self, id: &ElementId, updates: &ElementUpdate) {
        if let Some(index) = self.index_of(id) {
            updates.apply_to(&mut self.elements[index]);
        }
    }

    /// Append an offset to a path element without recording history.
    /// Returns false if `id` is not a path element.
    pub fn extend_path(&mut self, id: &ElementId, offset: Vec2) -> bool {
        let path = self
            .index_of(id)
            .and_then(|index| self.elements[index].body.as_path_mut());
        match path {
            Some(path) => {
                path.push_offset(offset);
                true
            }
            None => false,
        }
    }

    /// Change the selection. Unknown ids are ignored.
    pub fn set_selected_id(&mut self, id: Option<ElementId>) {
        match id {
            Some(id) if self.element(&id).is_none() => {
                log::debug!("set_selected_id: no element {}", id);
            }
            id => self.selected_id = id,
        }
    }

    /// Change the background (a display preference, not undoable).
    pub fn set_background_color(&mut self, background: Background) {
        self.background = background;
    }

    // ---- History ----

    /// Undo the last recorded change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.elements) {
            Some(snapshot) => {
                self.elements = snapshot;
                self.selected_id = None;
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.elements) {
            Some(snapshot) => {
                self.elements = snapshot;
                self.selected_id = None;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start a new document: drop elements, selection and all history.
    pub fn reset(&mut self) {
        log::info!("Resetting scene ({} elements dropped)", self.elements.len());
        self.elements.clear();
        self.selected_id = None;
        self.history.clear();
    }

    // ---- Persistence ----

    /// Capture the persistent parts of the document.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            elements: self.elements.clone(),
            canvas_width: self.canvas_size.width,
            canvas_height: self.canvas_size.height,
            background_color: self.background,
        }
    }

    /// Load a stored document, discarding selection and history.
    pub fn hydrate(&mut self, snapshot: DocumentSnapshot) {
        log::info!("Loading document with {} elements", snapshot.elements.len());
        self.elements = dedupe_ids(snapshot.elements);
        self.canvas_size = Size::new(snapshot.canvas_width, snapshot.canvas_height);
        self.background = snapshot.background_color;
        self.selected_id = None;
        self.history.clear();
    }
}

/// Keep the first element for every id.
fn dedupe_ids(elements: Vec<Element>) -> Vec<Element> {
    let mut seen = HashSet::with_capacity(elements.len());
    elements
        .into_iter()
        .filter(|e| {
            let fresh = seen.insert(e.id().clone());
            if !fresh {
                log::warn!("Dropping element with duplicate id {}", e.id());
            }
            fresh
        })
        .collect()
}
