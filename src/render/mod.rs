//! Renderers for formatted article content

mod html;
pub mod text;

pub use html::HtmlRenderer;
