//! # Pagecraft HTML Compiler
//!
//! Renders a [`Page`](pagecraft_model::Page) to static HTML: a `<style>`
//! block derived from the global styles and section settings, followed by
//! one `<section>` per visible section.
//!
//! ```rust,ignore
//! use pagecraft_compiler_html::{compile_to_html, CompileOptions};
//!
//! let html = compile_to_html(&page, &CompileOptions::default())?;
//! ```

mod compiler;
mod context;
mod styles;

pub use compiler::{compile_to_html, CompileError, CompileOptions};
pub use context::escape_html;

#[cfg(test)]
mod tests;
