//! Small input-handling helpers shared by the apps.

mod text_input;

pub use text_input::{TextInput, TextInputRequest};
