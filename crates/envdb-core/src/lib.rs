//! Core library for envdb: `.env` loading, database settings, and
//! conditional column migrations.

pub mod config;
pub mod db;
pub mod error;
pub mod utils;
