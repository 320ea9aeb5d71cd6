mod api_client;
mod concurrency;
mod helpers;
mod services;
