mod database_locator;
mod open_database;

pub use database_locator::{DatabaseLocator, IPV4_FILENAME, IPV4_URL, IPV6_FILENAME, IPV6_URL};
pub use open_database::OpenDatabase;
