//! Editor session: a scene plus the tool that drives it.

use crate::config::EditorConfig;
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::tools::{ToolKind, ToolManager};
use kurbo::Size;

/// Runtime editor state (not persisted).
#[derive(Debug, Clone, Default)]
pub struct Editor {
    /// The document being edited.
    pub scene: Scene,
    /// Tool manager.
    pub tools: ToolManager,
}

impl Editor {
    /// Create an editor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor from a configuration.
    pub fn with_config(config: &EditorConfig) -> Self {
        let scene = Scene::with_settings(
            Size::new(config.canvas_width, config.canvas_height),
            config.background_color,
            config.placement_margin,
            config.history_limit,
        );
        let tools = ToolManager {
            stroke_color: config.stroke_color,
            stroke_width: config.stroke_width,
            eraser_width: config.eraser_width,
            ..ToolManager::default()
        };
        Self { scene, tools }
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Switch the active tool, finishing any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Switching tool to {:?}", tool);
        self.tools.set_tool(tool, &mut self.scene);
    }

    /// Route a pointer event to the active tool.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.tools.pointer_down(&mut self.scene, position),
            PointerEvent::Move { position } => self.tools.pointer_move(&mut self.scene, position),
            PointerEvent::Up { position } => self.tools.pointer_up(&mut self.scene, position),
            PointerEvent::Leave => self.tools.pointer_leave(&mut self.scene),
        }
    }

    /// Undo, committing any gesture first so it lands in history.
    pub fn undo(&mut self) -> bool {
        self.tools.end(&mut self.scene);
        self.scene.undo()
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        self.tools.end(&mut self.scene);
        self.scene.redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Background, ElementKind, ElementUpdate};
    use kurbo::Point;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_with_config() {
        let config = EditorConfig {
            canvas_width: 400.0,
            canvas_height: 300.0,
            background_color: Background::Transparent,
            history_limit: 2,
            eraser_width: 6.0,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_config(&config);
        assert_eq!(editor.scene.canvas_size(), Size::new(400.0, 300.0));
        assert_eq!(editor.scene.background(), Background::Transparent);
        assert!((editor.tools.eraser_radius() - 3.0).abs() < f64::EPSILON);
        assert_eq!(editor.scene.history().limit(), 2);

        for _ in 0..5 {
            editor.scene.add_element(ElementKind::Rect, &ElementUpdate::default());
        }
        assert_eq!(editor.scene.history().undo_len(), 2);
    }

    #[test]
    fn test_drag_via_events() {
        let mut editor = Editor::new();
        let rect = editor
            .scene
            .add_element(ElementKind::Rect, &ElementUpdate::position(100.0, 100.0));

        editor.handle_pointer_event(down(150.0, 150.0));
        editor.handle_pointer_event(moved(170.0, 160.0));
        editor.handle_pointer_event(moved(200.0, 190.0));
        editor.handle_pointer_event(up(200.0, 190.0));

        let element = editor.scene.element(rect.id()).unwrap();
        assert_eq!(element.position(), Point::new(150.0, 140.0));

        assert!(editor.undo());
        let element = editor.scene.element(rect.id()).unwrap();
        assert_eq!(element.position(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_undo_mid_drag_commits_first() {
        let mut editor = Editor::new();
        let rect = editor
            .scene
            .add_element(ElementKind::Rect, &ElementUpdate::position(0.0, 0.0));

        editor.handle_pointer_event(down(10.0, 10.0));
        editor.handle_pointer_event(moved(60.0, 10.0));
        assert!(editor.tools.is_active());

        // Undo reverts the drag, not the add
        assert!(editor.undo());
        assert!(!editor.tools.is_active());
        let element = editor.scene.element(rect.id()).unwrap();
        assert_eq!(element.position(), Point::new(0.0, 0.0));
        assert!(editor.redo());
        let element = editor.scene.element(rect.id()).unwrap();
        assert_eq!(element.position(), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_freehand_then_leave() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Freehand);
        assert_eq!(editor.tool(), ToolKind::Freehand);

        editor.handle_pointer_event(down(10.0, 10.0));
        editor.handle_pointer_event(moved(12.0, 15.0));
        editor.handle_pointer_event(PointerEvent::Leave);
        assert!(!editor.tools.is_active());

        assert_eq!(editor.scene.len(), 1);
        let path = editor.scene.elements()[0].as_path().unwrap();
        assert_eq!(path.points, vec![0.0, 0.0, 2.0, 5.0]);

        // Moves after leave change nothing
        editor.handle_pointer_event(moved(50.0, 50.0));
        let path = editor.scene.elements()[0].as_path().unwrap();
        assert_eq!(path.pair_count(), 2);
    }
}
