//! Renderer trait abstraction.
//!
//! Drawing pixels happens outside the core. A renderer receives the scene
//! read-only, back to front, once per frame.

use crate::element::{Background, Element};
use crate::scene::Scene;
use kurbo::Size;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Asset unavailable: {0}")]
    AssetUnavailable(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Draws a scene. Implementations must handle every element kind.
pub trait Renderer {
    /// Start a frame of the given canvas size.
    fn begin_frame(&mut self, canvas_size: Size, background: Background) -> RenderResult<()>;

    /// Draw one element.
    fn draw_element(&mut self, element: &Element, selected: bool) -> RenderResult<()>;

    /// Finish the frame.
    fn end_frame(&mut self) -> RenderResult<()> {
        Ok(())
    }
}

impl Scene {
    /// Render the scene in paint order.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> RenderResult<()> {
        renderer.begin_frame(self.canvas_size(), self.background())?;
        let selected = self.selected_id();
        for element in self.elements() {
            renderer.draw_element(element, selected == Some(element.id()))?;
        }
        renderer.end_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ElementUpdate};

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        drawn: Vec<(ElementKind, bool)>,
        fail_on: Option<ElementKind>,
        closed: bool,
        fail_close: bool,
    }

    impl Renderer for Recorder {
        fn begin_frame(&mut self, _size: Size, _background: Background) -> RenderResult<()> {
            self.frames += 1;
            self.drawn.clear();
            Ok(())
        }

        fn draw_element(&mut self, element: &Element, selected: bool) -> RenderResult<()> {
            if self.fail_on == Some(element.kind()) {
                return Err(RenderError::AssetUnavailable(element.id().to_string()));
            }
            self.drawn.push((element.kind(), selected));
            Ok(())
        }

        fn end_frame(&mut self) -> RenderResult<()> {
            if self.fail_close {
                return Err(RenderError::RenderFailed("surface lost".to_string()));
            }
            self.closed = true;
            Ok(())
        }
    }

    #[test]
    fn test_render_back_to_front() {
        let mut scene = Scene::new();
        scene.add_element(ElementKind::Rect, &ElementUpdate::default());
        scene.add_element(ElementKind::Text, &ElementUpdate::default());

        let mut recorder = Recorder::default();
        scene.render(&mut recorder).unwrap();

        assert_eq!(recorder.frames, 1);
        assert!(recorder.closed);
        assert_eq!(
            recorder.drawn,
            vec![(ElementKind::Rect, false), (ElementKind::Text, true)]
        );
    }

    #[test]
    fn test_render_error_propagates() {
        let mut scene = Scene::new();
        scene.add_element(ElementKind::Image, &ElementUpdate::default());
        scene.add_element(ElementKind::Rect, &ElementUpdate::default());

        let mut recorder = Recorder {
            fail_on: Some(ElementKind::Image),
            ..Default::default()
        };
        let result = scene.render(&mut recorder);
        assert!(matches!(result, Err(RenderError::AssetUnavailable(_))));
        assert!(recorder.drawn.is_empty());
    }

    #[test]
    fn test_end_frame_error_propagates() {
        let mut scene = Scene::new();
        scene.add_element(ElementKind::Circle, &ElementUpdate::default());

        let mut recorder = Recorder {
            fail_close: true,
            ..Default::default()
        };
        let err = scene.render(&mut recorder).unwrap_err();
        assert!(matches!(err, RenderError::RenderFailed(_)));
        assert_eq!(err.to_string(), "Render failed: surface lost");
        assert_eq!(recorder.drawn, vec![(ElementKind::Circle, true)]);
        assert!(!recorder.closed);
    }
}
