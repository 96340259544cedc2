// src/ports/mod.rs
pub mod highlight;
pub mod html;
pub mod text;

pub use highlight::Highlighter;
pub use html::HtmlPresenter;
pub use text::TextPresenter;
