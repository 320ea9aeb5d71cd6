mod config;
mod log_observer;
mod models;
mod retry;
