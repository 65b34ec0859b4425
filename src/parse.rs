//! HTML and JSON convenience parsers.

mod html;
mod json;

pub use html::parse_html;
pub use html::Document;
pub use html::Node;
pub use json::parse_json_to_list;
pub use json::parse_json_to_map;
