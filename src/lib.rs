pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod proxy;
pub mod queue;
pub mod services;
pub mod session;
pub mod web;
