//! SQLite implementation of the bulkset connection contract

mod connection;
mod schema;

pub use connection::SqliteConnection;
