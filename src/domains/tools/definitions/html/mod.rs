//! HTML page generation tool.
//!
//! - `make_page` - the `make-html-page` tool (params, execution, route)
//! - `prompt` - the prompt sent to the generation provider
//! - `persist` - writing the generated page to disk

pub mod make_page;
pub mod persist;
pub mod prompt;

pub use make_page::{MakeHtmlPageParams, MakeHtmlPageTool};
pub use persist::{PersistError, write_page};
pub use prompt::build_page_prompt;
