//! Datastore implementations

mod postgres;

pub use postgres::PostgresDatastore;
