mod helper;
pub mod history;
mod reader;

pub use helper::LineHelper;
pub use history::History;
pub use reader::{InputError, LineReader, ReadOutcome};
