pub mod url_parser;
pub mod terminal_table;

pub use url_parser::hostname_from_url;
pub use terminal_table::new_table;
