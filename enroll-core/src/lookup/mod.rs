pub mod zip;

pub use zip::{ZipLocation, ZipLookupClient, parse_zip_response};
