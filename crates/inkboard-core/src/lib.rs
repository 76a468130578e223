//! Inkboard Core Library
//!
//! Platform-agnostic document model and editing logic for the Inkboard
//! slide editor: elements, scene, undo history, pointer tools and batch
//! edits. Rendering and persistence backends plug in through traits.

pub mod batch;
pub mod config;
pub mod editor;
pub mod element;
pub mod geometry;
pub mod history;
pub mod input;
pub mod render;
pub mod scene;
pub mod storage;
pub mod tools;

pub use batch::{ElementEdit, parse_edits};
pub use config::{ConfigError, EditorConfig};
pub use editor::Editor;
pub use element::{Background, Color, Element, ElementBody, ElementId, ElementKind, ElementUpdate};
pub use geometry::bounding_box;
pub use history::{History, MAX_UNDO_HISTORY};
pub use input::PointerEvent;
pub use render::{RenderError, RenderResult, Renderer};
pub use scene::Scene;
pub use storage::{DocumentSnapshot, FileStorage, MemoryStorage, Storage, StorageError};
pub use tools::{ToolKind, ToolManager, ToolState, erase_at};
