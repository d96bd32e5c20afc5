//! Outline Conversion
//!
//! Bidirectional conversion between Roam block trees and indented markdown:
//!
//! - [`renderer`] - block tree → markdown, `[[Page]]` → `[Page](Page)`
//! - [`parser`] - markdown → block tree with learned indentation depths,
//!   then parent-first creation through a [`BlockCreator`]
//!
//! Both sides are stateless between calls.

pub mod parser;
pub mod renderer;

pub use parser::{
    parse_outline, write_blocks, write_outline, BlockCreator, IndentLevels, OutlineWriteError,
    OutlineWriteResult,
};
pub use renderer::{render_block, rewrite_references};
