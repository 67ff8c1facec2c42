pub mod catalog;
pub mod errors;
pub mod load;
pub mod table;

pub use catalog::parse_catalog_text;
pub use errors::TableError;
pub use load::{load_table, TableFileRaw, NAME_COLUMN};
pub use table::DimensionTable;
