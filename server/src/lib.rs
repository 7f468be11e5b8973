pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod http_server;
