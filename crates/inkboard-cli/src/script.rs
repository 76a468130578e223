//! Session scripts: JSON step lists replayed against an editor.

use inkboard_core::{
    Background, Editor, Element, ElementId, ElementKind, ElementUpdate, PointerEvent, ToolKind,
    parse_edits,
};
use kurbo::Point;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One scripted action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Tool {
        tool: ToolKind,
    },
    Down {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
    },
    Leave,
    /// Add an element; `alias` names it for later steps.
    Add {
        kind: ElementKind,
        #[serde(default)]
        overrides: ElementUpdate,
        #[serde(default)]
        alias: Option<String>,
    },
    Update {
        id: String,
        updates: ElementUpdate,
    },
    Delete {
        id: String,
    },
    Select {
        #[serde(default)]
        id: Option<String>,
    },
    Forward {
        id: String,
    },
    Backward {
        id: String,
    },
    Background {
        color: Background,
    },
    Undo,
    Redo,
    /// Raw edit list, filtered the same way as untrusted input.
    Batch {
        edits: Value,
    },
    Replace {
        elements: Vec<Element>,
    },
    Reset,
}

/// Parse a script document.
pub fn parse_script(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

/// An editor plus the aliases assigned by `add` steps.
#[derive(Debug, Default)]
pub struct Session {
    pub editor: Editor,
    aliases: HashMap<String, ElementId>,
}

impl Session {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            aliases: HashMap::new(),
        }
    }

    /// Map an alias to its element id; anything else is taken as a raw id.
    fn resolve(&self, id: &str) -> ElementId {
        self.aliases
            .get(id)
            .cloned()
            .unwrap_or_else(|| ElementId::from(id))
    }

    pub fn run(&mut self, steps: &[Step]) {
        for step in steps {
            self.apply(step);
        }
    }

    pub fn apply(&mut self, step: &Step) {
        log::trace!("Step: {:?}", step);
        match step {
            Step::Tool { tool } => self.editor.set_tool(*tool),
            Step::Down { x, y } => self.pointer(PointerEvent::Down {
                position: Point::new(*x, *y),
            }),
            Step::Move { x, y } => self.pointer(PointerEvent::Move {
                position: Point::new(*x, *y),
            }),
            Step::Up { x, y } => self.pointer(PointerEvent::Up {
                position: Point::new(*x, *y),
            }),
            Step::Leave => self.pointer(PointerEvent::Leave),
            Step::Add {
                kind,
                overrides,
                alias,
            } => {
                let element = self.editor.scene.add_element(*kind, overrides);
                if let Some(alias) = alias {
                    self.aliases.insert(alias.clone(), element.id().clone());
                }
            }
            Step::Update { id, updates } => {
                let id = self.resolve(id);
                self.editor.scene.update_element(&id, updates);
            }
            Step::Delete { id } => {
                let id = self.resolve(id);
                self.editor.scene.delete_element(&id);
            }
            Step::Select { id } => {
                let id = id.as_deref().map(|id| self.resolve(id));
                self.editor.scene.set_selected_id(id);
            }
            Step::Forward { id } => {
                let id = self.resolve(id);
                self.editor.scene.bring_forward(&id);
            }
            Step::Backward { id } => {
                let id = self.resolve(id);
                self.editor.scene.send_backward(&id);
            }
            Step::Background { color } => self.editor.scene.set_background_color(*color),
            Step::Undo => {
                self.editor.undo();
            }
            Step::Redo => {
                self.editor.redo();
            }
            Step::Batch { edits } => {
                let mut edits = parse_edits(edits);
                for edit in &mut edits {
                    edit.id = self.resolve(edit.id.as_str());
                }
                let changed = self.editor.scene.apply_batch(&edits);
                log::info!("Batch changed {} element(s)", changed);
            }
            Step::Replace { elements } => self.editor.scene.replace_elements(elements.clone()),
            Step::Reset => {
                self.aliases.clear();
                self.editor.scene.reset();
            }
        }
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.editor.handle_pointer_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(json: &str) -> Session {
        let steps = parse_script(json).unwrap();
        let mut session = Session::default();
        session.run(&steps);
        session
    }

    #[test]
    fn test_freehand_script() {
        let session = run(r#"[
            {"op": "tool", "tool": "freehand"},
            {"op": "down", "x": 100, "y": 100},
            {"op": "move", "x": 120, "y": 100},
            {"op": "move", "x": 120, "y": 140},
            {"op": "up", "x": 120, "y": 140}
        ]"#);

        let scene = &session.editor.scene;
        assert_eq!(scene.len(), 1);
        let path = scene.elements()[0].as_path().unwrap();
        assert_eq!(path.points, vec![0.0, 0.0, 20.0, 0.0, 20.0, 40.0]);
        assert_eq!(scene.history().undo_len(), 1);
    }

    #[test]
    fn test_aliases_resolve() {
        let session = run(r##"[
            {"op": "add", "kind": "rect", "alias": "a"},
            {"op": "add", "kind": "star", "alias": "b"},
            {"op": "update", "id": "a", "updates": {"fill": "#000000"}},
            {"op": "backward", "id": "b"},
            {"op": "batch", "edits": [{"id": "b", "updates": {"opacity": 0.25}}, {"id": "zz", "updates": {}}]}
        ]"##);

        let scene = &session.editor.scene;
        let kinds: Vec<ElementKind> = scene.elements().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![ElementKind::Star, ElementKind::Rect]);
        assert!((scene.elements()[0].opacity - 0.25).abs() < f64::EPSILON);
        let fill = scene.elements()[1].body.as_shape().unwrap().fill;
        assert_eq!(fill.to_string(), "#000000");
    }

    #[test]
    fn test_undo_redo_reset() {
        let session = run(r#"[
            {"op": "add", "kind": "circle"},
            {"op": "add", "kind": "text"},
            {"op": "undo"},
            {"op": "redo"},
            {"op": "undo"}
        ]"#);
        assert_eq!(session.editor.scene.len(), 1);
        assert!(session.editor.scene.can_redo());

        let session = run(r#"[
            {"op": "add", "kind": "circle", "alias": "c"},
            {"op": "reset"},
            {"op": "select", "id": "c"}
        ]"#);
        assert!(session.editor.scene.is_empty());
        assert!(!session.editor.scene.can_undo());
        assert!(session.editor.scene.selected_id().is_none());
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(parse_script(r#"[{"op": "teleport"}]"#).is_err());
        assert!(parse_script(r#"{"op": "undo"}"#).is_err());
    }
}
