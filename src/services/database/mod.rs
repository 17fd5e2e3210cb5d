// Database service module
// SQLite database connection and schema management

pub mod connection;
pub mod migrations;
pub mod schema;

pub use connection::Database;
