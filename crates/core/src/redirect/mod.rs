mod click;
mod sink;
mod table;

pub use click::ClickRecord;
pub use sink::{ClickSink, SinkError};
pub use table::{RedirectEntry, RedirectTable};
