pub mod config;
pub mod console;
pub mod db;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod utils;
