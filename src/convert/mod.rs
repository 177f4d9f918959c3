mod batch;
mod core;
mod formatter;
mod history;

pub use batch::convert_table;
pub use formatter::{format_bb, DisplayMode};
pub use history::{BbHistory, BbSnapshot};
pub use self::core::{chips_to_bb, ConversionError};
