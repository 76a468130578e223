//! Batch edits supplied by external collaborators.
//!
//! A batch is a list of `{id, updates}` pairs (typically produced by a
//! language model or an automated layout). It is applied as one undoable
//! step and can only touch elements that already exist.

use crate::element::{ElementId, ElementUpdate};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One edit of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementEdit {
    pub id: ElementId,
    pub updates: ElementUpdate,
}

impl ElementEdit {
    pub fn new(id: impl Into<ElementId>, updates: ElementUpdate) -> Self {
        Self {
            id: id.into(),
            updates,
        }
    }
}

fn parse_entry(entry: &Value) -> Option<ElementEdit> {
    let id = entry.get("id")?.as_str()?;
    let updates = entry.get("updates")?;
    if !updates.is_object() {
        return None;
    }
    match serde_json::from_value::<ElementUpdate>(updates.clone()) {
        Ok(updates) => Some(ElementEdit::new(id, updates)),
        Err(e) => {
            log::debug!("Dropping batch edit for {}: {}", id, e);
            None
        }
    }
}

/// Extract well-formed edits from an untrusted JSON array.
///
/// Entries without a string `id`, without an `updates` object, or whose
/// updates don't fit any element property are dropped; a partially valid
/// response still yields its valid edits.
pub fn parse_edits(value: &Value) -> Vec<ElementEdit> {
    let Some(entries) = value.as_array() else {
        log::debug!("Batch edit payload is not an array");
        return Vec::new();
    };

    let edits: Vec<ElementEdit> = entries.iter().filter_map(parse_entry).collect();
    if edits.len() < entries.len() {
        log::debug!(
            "Discarded {} malformed batch edit(s)",
            entries.len() - edits.len()
        );
    }
    edits
}

impl Scene {
    /// Apply `edits` as a single recorded mutation.
    ///
    /// Edits for unknown ids are ignored; when several edits target the same
    /// id the last one wins. Returns the number of elements changed. When
    /// nothing matches, neither history nor selection is touched.
    pub fn apply_batch(&mut self, edits: &[ElementEdit]) -> usize {
        let lookup: HashMap<&ElementId, &ElementUpdate> =
            edits.iter().map(|edit| (&edit.id, &edit.updates)).collect();

        let mut matched = 0;
        let next: Vec<_> = self
            .elements()
            .iter()
            .map(|element| {
                let mut element = element.clone();
                if let Some(updates) = lookup.get(element.id()) {
                    updates.apply_to(&mut element);
                    matched += 1;
                }
                element
            })
            .collect();

        if matched == 0 {
            log::debug!("Batch of {} edit(s) matched no elements", edits.len());
            return 0;
        }

        log::debug!("Applying batch: {} of {} edit(s) matched", matched, edits.len());
        self.replace_elements(next);
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind};
    use crate::storage::DocumentSnapshot;
    use serde_json::json;

    fn abc_scene() -> Scene {
        let mut scene = Scene::new();
        let elements = ["a", "b", "c"]
            .into_iter()
            .map(|id| Element::with_id(id, ElementKind::Rect.default_body()))
            .collect();
        scene.hydrate(DocumentSnapshot {
            elements,
            ..scene.snapshot()
        });
        scene
    }

    #[test]
    fn test_batch_atomicity() {
        let mut scene = abc_scene();
        scene.set_selected_id(Some("b".into()));
        let edits = parse_edits(&json!([
            {"id": "a", "updates": {"opacity": 0.5}},
            {"id": "z", "updates": {"opacity": 0}}
        ]));
        assert_eq!(edits.len(), 2);

        let changed = scene.apply_batch(&edits);
        assert_eq!(changed, 1);
        assert_eq!(scene.history().undo_len(), 1);
        assert!(scene.selected_id().is_none());

        let opacity = |id: &str| scene.element(&id.into()).unwrap().opacity;
        assert!((opacity("a") - 0.5).abs() < f64::EPSILON);
        assert!((opacity("b") - 1.0).abs() < f64::EPSILON);
        assert!((opacity("c") - 1.0).abs() < f64::EPSILON);

        // The whole batch undoes in one step
        assert!(scene.undo());
        assert!((scene.element(&"a".into()).unwrap().opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unmatched_batch_is_noop() {
        let mut scene = abc_scene();
        scene.set_selected_id(Some("a".into()));
        let before = scene.elements().to_vec();

        let changed = scene.apply_batch(&[ElementEdit::new("nope", ElementUpdate::position(1.0, 1.0))]);
        assert_eq!(changed, 0);
        assert!(!scene.can_undo());
        assert_eq!(scene.selected_id().map(|id| id.as_str()), Some("a"));
        assert_eq!(scene.elements(), before.as_slice());

        assert_eq!(scene.apply_batch(&[]), 0);
        assert!(!scene.can_undo());
    }

    #[test]
    fn test_malformed_entries_filtered() {
        let edits = parse_edits(&json!([
            {"id": "a", "updates": {"x": 10}},
            {"updates": {"x": 1}},
            {"id": 7, "updates": {"x": 1}},
            {"id": "b"},
            {"id": "b", "updates": null},
            {"id": "b", "updates": false},
            {"id": "b", "updates": "x=1"},
            {"id": "c", "updates": {"fill": "not a color"}},
            "garbage",
            {"id": "c", "updates": {"y": 3, "mystery": true}}
        ]));

        let ids: Vec<&str> = edits.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(edits[1].updates.y, Some(3.0));
    }

    #[test]
    fn test_non_array_payload() {
        assert!(parse_edits(&json!({"id": "a"})).is_empty());
        assert!(parse_edits(&Value::Null).is_empty());
    }

    #[test]
    fn test_last_edit_for_id_wins() {
        let mut scene = abc_scene();
        let edits = vec![
            ElementEdit::new("c", ElementUpdate::position(1.0, 1.0)),
            ElementEdit::new("c", ElementUpdate::position(2.0, 2.0)),
        ];
        assert_eq!(scene.apply_batch(&edits), 1);
        assert!((scene.element(&"c".into()).unwrap().x - 2.0).abs() < f64::EPSILON);
    }
}
