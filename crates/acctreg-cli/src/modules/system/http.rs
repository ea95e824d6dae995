use tracing::debug;

use super::Settings;

/// Builds the client shared by every request of one batch. Proxy routing is
/// decided here only: with no proxy configured, system proxy detection is
/// switched off as well.
pub(crate) fn build_http_client(settings: &Settings) -> anyhow::Result<reqwest::Client> {
    let builder = reqwest::Client::builder().timeout(settings.request_timeout);
    let builder = match settings.proxy.as_ref() {
        Some(proxy) => {
            debug!(proxy = %proxy, "routing token requests through proxy");
            builder.proxy(reqwest::Proxy::all(proxy.as_str())?)
        }
        None => builder.no_proxy(),
    };
    Ok(builder.build()?)
}
