//! Containers and leaf widgets built on the component contract.

pub mod r#box;
pub mod button;
pub mod center;
pub mod flex;
pub mod form;
pub mod grid;
pub mod progress;
pub mod text_field;

pub use button::Button;
pub use center::{Center, FractionalCenter};
pub use flex::{Direction, Flex};
pub use form::Form;
pub use grid::{Grid, GridCell};
pub use progress::{ProgressBar, ProgressHandle};
pub use r#box::{Box, FocusCapture, KeyCapture, MouseCapture, PasteCapture};
pub use text_field::TextField;
