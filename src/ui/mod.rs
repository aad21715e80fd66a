//! User interface rendering layer with component-based architecture.
//!
//! Transforms view models into ANSI-styled text through composable rendering
//! components, with theme support, width-aware layout and fuzzy match
//! highlighting.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{
    DetailView, DisplayCell, DisplayRow, EmptyState, FilterBarInfo, FooterInfo, FormView,
    HeaderInfo, ListView, ScreenView, UIViewModel,
};
