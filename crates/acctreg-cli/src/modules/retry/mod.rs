mod actions;
mod http;
mod processor;
mod types;

pub(crate) use actions::handle_retry_failed;
