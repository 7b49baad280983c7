// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod export_formatter;
pub mod http_response;
pub mod sinks;
pub mod wall_clock;
