//! Terminal user-interface building blocks.
//!
//! Input (cancellable line reads), output (renderer), and the fetch spinner
//! live side by side here; glyphs and colors are centralized in `settings`.

pub mod input;
pub mod progress;
pub mod renderer;
pub mod settings;

pub use input::{normalize_answer, AnswerSource, LineReader, ReadOutcome};
pub use progress::{start_progress, start_progress_with, ProgressHandle};
pub use renderer::Renderer;
