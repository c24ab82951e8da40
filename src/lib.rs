pub mod api;
pub mod api_docs;
pub mod auth;
pub mod config;
pub mod db;
pub mod game;
pub mod models;
pub mod seed;
pub mod services;
