pub(crate) mod http;
mod settings;
mod types;

pub(crate) use http::build_http_client;
pub(crate) use settings::Settings;
pub(crate) use types::CommandContext;
