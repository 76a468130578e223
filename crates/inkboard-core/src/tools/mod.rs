//! Tool system: turns pointer gestures into scene mutations.

use crate::element::{Color, ElementId, ElementKind, ElementUpdate};
use crate::geometry::{bounding_box, point_in_padded_box};
use crate::scene::Scene;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default eraser diameter in canvas units.
pub const DEFAULT_ERASER_WIDTH: f64 = 20.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Select and drag elements.
    #[default]
    #[serde(rename = "default")]
    Select,
    Line,
    Freehand,
    Eraser,
}

impl ToolKind {
    /// Element kind created by a drawing tool.
    pub fn draws(self) -> Option<ElementKind> {
        match self {
            ToolKind::Line => Some(ElementKind::Line),
            ToolKind::Freehand => Some(ElementKind::Freehand),
            ToolKind::Select | ToolKind::Eraser => None,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// Moving an element with the select tool.
    Dragging {
        id: ElementId,
        /// Pointer position at pointer-down.
        grab: Point,
        /// Element position at pointer-down.
        origin: Point,
        /// Element position last set by the drag.
        last: Point,
    },
    /// Growing a freshly created path element.
    Drawing {
        id: ElementId,
        /// Pointer position at pointer-down; path offsets are relative to it.
        origin: Point,
    },
    /// Erasing while the pointer is held down.
    Erasing,
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Stroke color for new paths.
    pub stroke_color: Color,
    /// Stroke width for new paths.
    pub stroke_width: f64,
    /// Eraser diameter.
    pub eraser_width: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            stroke_color: Color::ink(),
            stroke_width: 4.0,
            eraser_width: DEFAULT_ERASER_WIDTH,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools, ending any interaction in progress.
    pub fn set_tool(&mut self, tool: ToolKind, scene: &mut Scene) {
        self.end(scene);
        self.current_tool = tool;
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Id of the element being dragged or drawn, if any.
    pub fn active_element(&self) -> Option<&ElementId> {
        match &self.state {
            ToolState::Dragging { id, .. } | ToolState::Drawing { id, .. } => Some(id),
            ToolState::Idle | ToolState::Erasing => None,
        }
    }

    /// Eraser hit radius.
    pub fn eraser_radius(&self) -> f64 {
        self.eraser_width / 2.0
    }

    /// Begin a tool interaction.
    pub fn pointer_down(&mut self, scene: &mut Scene, point: Point) {
        // A missed pointer-up must not leak into the next gesture
        self.end(scene);

        match self.current_tool {
            ToolKind::Select => {
                let hit = scene.element_at(point).map(|e| (e.id().clone(), e.position()));
                match hit {
                    Some((id, origin)) => {
                        scene.set_selected_id(Some(id.clone()));
                        self.state = ToolState::Dragging {
                            id,
                            grab: point,
                            origin,
                            last: origin,
                        };
                    }
                    None => scene.set_selected_id(None),
                }
            }
            ToolKind::Line | ToolKind::Freehand => {
                if scene.element_at(point).is_some() {
                    log::debug!("Ignoring {:?} stroke started on an element", self.current_tool);
                    return;
                }
                let Some(kind) = self.current_tool.draws() else {
                    return;
                };
                let overrides = ElementUpdate {
                    x: Some(point.x),
                    y: Some(point.y),
                    points: Some(vec![0.0, 0.0]),
                    stroke: Some(self.stroke_color),
                    stroke_width: Some(self.stroke_width),
                    ..Default::default()
                };
                let element = scene.add_element(kind, &overrides);
                self.state = ToolState::Drawing {
                    id: element.id().clone(),
                    origin: point,
                };
            }
            ToolKind::Eraser => {
                self.state = ToolState::Erasing;
                erase_at(scene, point, self.eraser_radius());
            }
        }
    }

    /// Update the current interaction.
    pub fn pointer_move(&mut self, scene: &mut Scene, point: Point) {
        let radius = self.eraser_radius();
        match &mut self.state {
            ToolState::Idle => {}
            ToolState::Dragging {
                id,
                grab,
                origin,
                last,
            } => {
                let target = *origin + (point - *grab);
                scene.mutate_element(id, &ElementUpdate::position(target.x, target.y));
                *last = target;
            }
            ToolState::Drawing { id, origin } => {
                let offset = point - *origin;
                match self.current_tool {
                    ToolKind::Line => {
                        // A line is always exactly two endpoints
                        let points = vec![0.0, 0.0, offset.x, offset.y];
                        scene.mutate_element(id, &ElementUpdate::points(points));
                    }
                    ToolKind::Freehand => {
                        scene.extend_path(id, offset);
                    }
                    ToolKind::Select | ToolKind::Eraser => {}
                }
            }
            ToolState::Erasing => {
                erase_at(scene, point, radius);
            }
        }
    }

    /// End the current interaction (pointer released).
    pub fn pointer_up(&mut self, scene: &mut Scene, _point: Point) {
        self.end(scene);
    }

    /// End the current interaction (pointer left the canvas).
    pub fn pointer_leave(&mut self, scene: &mut Scene) {
        self.end(scene);
    }

    /// Finish whatever interaction is active and return to idle.
    ///
    /// A completed drag becomes a single recorded update: the element is put
    /// back at its pre-drag origin and then moved to its final position, so
    /// undo returns it to where the drag started. Strokes need no commit;
    /// the recorded creation already covers them.
    ///
    /// A drag that ends where it started records nothing. If the element
    /// was moved or removed by something else mid-drag (an undo, a batch),
    /// the drag is dropped.
    pub fn end(&mut self, scene: &mut Scene) {
        match std::mem::take(&mut self.state) {
            ToolState::Dragging {
                id, origin, last, ..
            } => {
                if last == origin {
                    return;
                }
                match scene.element(&id).map(|e| e.position()) {
                    Some(position) if position == last => {
                        scene.mutate_element(&id, &ElementUpdate::position(origin.x, origin.y));
                        scene.update_element(&id, &ElementUpdate::position(last.x, last.y));
                    }
                    _ => log::debug!("Dropping drag of {}: element changed underneath", id),
                }
            }
            ToolState::Drawing { id, .. } => {
                if let Some(path) = scene.element(&id).and_then(|e| e.as_path()) {
                    log::debug!("Finished stroke {} with {} point(s)", id, path.pair_count());
                }
            }
            _ => {}
        }
    }
}

/// Delete every unlocked element whose bounds come within `radius` of
/// `point`. Each deletion is recorded separately. Returns the number of
/// elements erased.
pub fn erase_at(scene: &mut Scene, point: Point, radius: f64) -> usize {
    let hits: Vec<ElementId> = scene
        .elements()
        .iter()
        .filter(|e| !e.locked)
        .filter(|e| bounding_box(e).is_some_and(|b| point_in_padded_box(point, b, radius)))
        .map(|e| e.id().clone())
        .collect();

    for id in &hits {
        scene.delete_element(id);
    }
    if !hits.is_empty() {
        log::debug!("Eraser removed {} element(s)", hits.len());
    }
    hits.len()
}
