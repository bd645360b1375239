pub mod json_feed;
pub mod master_csv;

pub use json_feed::{decode_feed, decode_feed_value};
pub use master_csv::{read_master_csv, read_master_csv_from};
