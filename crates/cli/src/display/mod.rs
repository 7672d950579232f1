pub mod formatter;

pub use formatter::{format_entry, print_mapping};
