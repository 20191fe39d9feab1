use anyhow::anyhow;
use std::error::Error as StdError;
use std::io::ErrorKind;

fn error_chain_has_connection_refused(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == ErrorKind::ConnectionRefused
        {
            return true;
        }

        if source
            .to_string()
            .to_ascii_lowercase()
            .contains("connection refused")
        {
            return true;
        }

        current = source.source();
    }

    false
}

fn error_chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == ErrorKind::TimedOut
        {
            return true;
        }

        if source
            .to_string()
            .to_ascii_lowercase()
            .contains("timed out")
        {
            return true;
        }

        current = source.source();
    }

    false
}

pub(crate) fn model_api_request_error(
    err: reqwest::Error,
    api_url: &str,
    timeout_secs: u64,
) -> anyhow::Error {
    if err.is_timeout() || error_chain_has_timeout(&err) {
        return anyhow!(
            "Model request timed out after {}s while calling '{}'. \
             Increase MODEL_TIMEOUT_SECS or check model responsiveness.",
            timeout_secs,
            api_url
        );
    }

    if err.is_connect() {
        if error_chain_has_connection_refused(&err) {
            return anyhow!(
                "Connection refused by model API at '{}'. \
                 Ensure GEMINI_BASE_URL points at a reachable endpoint.",
                api_url
            );
        }

        return anyhow!(
            "Failed to connect to model API at '{}'. \
             Check GEMINI_BASE_URL and network connectivity.",
            api_url
        );
    }

    anyhow!("Failed to call model API at '{}': {}", api_url, err)
}
