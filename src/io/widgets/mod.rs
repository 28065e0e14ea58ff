//! Widgets build on [`Screen`](super::output::Screen)'s raw writes. They're configured builder
//! style and do the actual writing when dropped.

mod header;
mod textbox;

pub use header::Header;
pub use textbox::Textbox;
