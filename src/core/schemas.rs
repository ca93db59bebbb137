//! Database schema definitions for the meal catalog.
//!
//! The catalog is a single SQLite database holding one table, `meals`.
//! Deletion is logical only: `delete_meal` flips the `deleted` flag and every
//! read filters on it, so a row is never physically removed.

pub const CATALOG_DB_NAME: &str = "catalog.db";

pub const CATALOG_DB_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS meals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        meal TEXT NOT NULL UNIQUE,
        cuisine TEXT NOT NULL,
        price REAL NOT NULL CHECK(price > 0),
        difficulty TEXT NOT NULL CHECK(difficulty IN ('LOW', 'MED', 'HIGH')),
        battles INTEGER NOT NULL DEFAULT 0,
        wins INTEGER NOT NULL DEFAULT 0,
        deleted BOOLEAN NOT NULL DEFAULT FALSE
    )
";

pub const CATALOG_DB_DROP: &str = "DROP TABLE IF EXISTS meals";
