pub mod config;
pub mod form;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod upstream;
pub mod validation;
