//! keel-adapter-mongodb - MongoDB 适配器

mod client;
mod config;
mod health;

pub use client::*;
pub use config::DbConfig;
pub use health::*;

pub use mongodb::{Client, Database};
