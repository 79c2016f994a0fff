use agenda_core::config::{AuthMethod, Settings};

use super::actor::Actor;
use crate::error::{ServiceError, ServiceResult};

/// The configured single user acts on every request.
fn authenticate_single_user(config: &Settings) -> ServiceResult<Actor> {
    let single_user = config.auth.single_user.as_ref().ok_or_else(|| {
        ServiceError::InvalidConfiguration("Single user config is missing".to_string())
    })?;
    Ok(Actor::from_email(&single_user.name, &single_user.email))
}

/// A fronting proxy has already authenticated the user and passes the email in
/// a trusted header.
fn authenticate_proxy(req: &salvo::Request, config: &Settings) -> ServiceResult<Actor> {
    let header = config
        .auth
        .proxy
        .as_ref()
        .map_or(agenda_core::constants::DEFAULT_PROXY_USER_HEADER, |proxy| {
            proxy.header_name()
        });
    let email = req
        .headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ServiceError::NotAuthenticated)?;

    tracing::trace!(header, email, "Proxy user header found");
    Ok(Actor::from_email(email, email))
}

/// ## Summary
/// Authenticate a user based on the configured authentication method.
///
/// ## Errors
/// `NotAuthenticated` when the proxy header is missing or empty,
/// `InvalidConfiguration` when the single user section is absent.
#[tracing::instrument(skip(req, config), fields(method = ?config.auth.method))]
pub fn authenticate(req: &salvo::Request, config: &Settings) -> ServiceResult<Actor> {
    match config.auth.method {
        AuthMethod::SingleUser => authenticate_single_user(config),
        AuthMethod::Proxy => authenticate_proxy(req, config),
    }
}
