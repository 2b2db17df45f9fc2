pub mod node;
pub mod table;
pub mod text;

pub use node::{CellKind, CellNode, ClickFn, Content, RowNode, Section};
pub use table::TableElement;
pub use text::display_width;
