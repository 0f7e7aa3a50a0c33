//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak prompt strings, glyphs, colors,
//! indentation, and spinner behavior.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Layout / indentation
// ---------------------------------------------------------------------------

pub const INDENT_1: &str = "   ";
pub const INDENT_2: &str = "      ";

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_DELETE_WITH_OPEN: &str =
    "Delete this repository? (y/n/o to open in browser, default n): ";
pub const PROMPT_DELETE: &str = "Delete this repository? (y/n, default n): ";
pub const PROMPT_RISK_CONFIRM: &str =
    "This fork has open PRs. Are you ABSOLUTELY sure you want to delete it? (yes/N): ";

pub const ANSWER_YES_SHORT: &str = "y";
pub const ANSWER_YES_LONG: &str = "yes";
pub const ANSWER_OPEN: &str = "o";

// ---------------------------------------------------------------------------
// Glyphs
// ---------------------------------------------------------------------------

pub const GLYPH_REPOSITORY: &str = "📂";
pub const GLYPH_PARENT: &str = "🔄";
pub const GLYPH_ARCHIVED: &str = "📦";
pub const GLYPH_COMMITS: &str = "📊";
pub const GLYPH_WARNING: &str = "⚠️";
pub const GLYPH_UPDATED: &str = "📅";
pub const GLYPH_PROMPT: &str = "❔";
pub const GLYPH_RISK_PROMPT: &str = "❗";
pub const GLYPH_SKIP: &str = "⏭️ ";
pub const GLYPH_DELETE: &str = "🗑️ ";
pub const GLYPH_DELETED: &str = "✅";
pub const GLYPH_DONE: &str = "✨";

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

// ---------------------------------------------------------------------------
// Spinner / progress
// ---------------------------------------------------------------------------

pub const PROGRESS_CLEAR_LINE: &str = "\r\x1b[2K";
pub const PROGRESS_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const PROGRESS_TICK_MS: u64 = 100;
pub const PROGRESS_LABEL_FETCH: &str = "Fetching forks";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_REPOSITORY: Color = Color::Green;
pub const COLOR_INFO: Color = Color::Blue;
pub const COLOR_ARCHIVED: Color = Color::Red;
pub const COLOR_RISK: Color = Color::Red;
pub const COLOR_PR_TITLE: Color = Color::Yellow;
pub const COLOR_UPDATED: Color = Color::Yellow;
pub const COLOR_PROMPT: Color = Color::Magenta;
pub const COLOR_DELETE: Color = Color::Red;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_SUMMARY: Color = Color::Cyan;

pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_PROGRESS_FRAME: Color = Color::Cyan;
pub const COLOR_PROGRESS_LABEL: Color = Color::DarkGrey;
pub const COLOR_PROGRESS_ELAPSED: Color = Color::DarkGrey;
