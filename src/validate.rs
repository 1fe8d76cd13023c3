//! Page request validation
//!
//! Structural and policy checks run before any network access. Checks run
//! in a fixed order and short-circuit on the first failure; validation is
//! deterministic and has no side effects, so it is safe to call repeatedly.

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::registry::EntityRegistry;
use crate::request::PageRequest;
use url::Url;

/// Maximum page size allowed in a page request
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validate a page request against the registry and the request policy
pub fn validate_page_request(registry: &EntityRegistry, request: &PageRequest) -> Result<()> {
    if !registry.contains(&request.entity) {
        return Err(Error::invalid_entity_config(format!(
            "Provided entity external ID is invalid: {}",
            request.entity
        )));
    }

    match &request.credential {
        None => {
            return Err(Error::invalid_datasource_config(
                "Provided datasource auth is missing required credentials",
            ));
        }
        Some(Credential::Token(token)) if token.is_empty() => {
            return Err(Error::invalid_datasource_config(
                "Provided datasource auth has an empty token",
            ));
        }
        Some(Credential::Basic { username, password })
            if username.is_empty() || password.is_empty() =>
        {
            return Err(Error::invalid_datasource_config(
                "Provided datasource auth is missing required basic credentials",
            ));
        }
        Some(_) => {}
    }

    let secure = Url::parse(&request.address)
        .map(|url| url.scheme() == "https")
        .unwrap_or(false);
    if !secure {
        return Err(Error::invalid_datasource_config(
            "Provided datasource address is not an https:// URL",
        ));
    }

    if !request.ordered {
        return Err(Error::invalid_entity_config("Ordered must be true"));
    }

    if request.page_size > MAX_PAGE_SIZE {
        return Err(Error::invalid_page_request_config(format!(
            "Provided page size ({}) exceeds maximum ({})",
            request.page_size, MAX_PAGE_SIZE
        )));
    }

    Ok(())
}
