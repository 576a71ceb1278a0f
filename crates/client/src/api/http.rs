//! REST client for the storefront backend.

use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use greencart_core::{Cart, Product};

use super::types::{AuthResponse, CartUpdateRequest, ProductListResponse, StatusResponse};
use super::{ApiError, CatalogService, SellerService, SessionService};
use crate::config::BackendConfig;
use crate::session::Session;

const USER_AUTH_PATH: &str = "api/user/is-auth";
const PRODUCT_LIST_PATH: &str = "api/product/list";
const CART_UPDATE_PATH: &str = "api/cart/update";
const SELLER_AUTH_PATH: &str = "api/seller/is-auth";

/// `reqwest`-backed implementation of the backend services.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the session cookie is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie.expose_secret())
                .map_err(|e| ApiError::InvalidCookie(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }
}

/// Check the status and decode the JSON body of a response.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

impl SessionService for HttpBackend {
    #[instrument(skip(self))]
    async fn get_session(&self) -> Result<Session, ApiError> {
        let response: AuthResponse = self.get_json(USER_AUTH_PATH).await?;
        let session = Session::from(response.into_user());
        debug!(authenticated = session.is_authenticated(), "Fetched session");
        Ok(session)
    }

    #[instrument(skip(self, cart), fields(items = cart.len()))]
    async fn push_cart(&self, cart: &Cart) -> Result<(), ApiError> {
        let url = self.endpoint(CART_UPDATE_PATH)?;
        let body = CartUpdateRequest { cart_items: cart };
        let response = self.client.post(url).json(&body).send().await?;
        let status: StatusResponse = read_json(response).await?;
        status.into_result()
    }
}

impl CatalogService for HttpBackend {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response: ProductListResponse = self.get_json(PRODUCT_LIST_PATH).await?;
        let products = response.into_products()?;
        debug!(count = products.len(), "Fetched product list");
        Ok(products)
    }
}

impl SellerService for HttpBackend {
    #[instrument(skip(self))]
    async fn is_seller(&self) -> Result<bool, ApiError> {
        let response: StatusResponse = self.get_json(SELLER_AUTH_PATH).await?;
        Ok(response.success)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;

    fn config(base: &str) -> BackendConfig {
        BackendConfig {
            base_url: Url::parse(base).unwrap(),
            session_cookie: Some(SecretString::from("token=abc123")),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint_joins_relative_path() {
        let backend = HttpBackend::new(&config("http://localhost:4000/")).unwrap();
        let url = backend.endpoint(CART_UPDATE_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/cart/update");
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let backend = HttpBackend::new(&config("https://shop.example.com/v1/")).unwrap();
        let url = backend.endpoint(PRODUCT_LIST_PATH).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/v1/api/product/list");
    }

    #[test]
    fn test_invalid_cookie_is_rejected() {
        let mut config = config("http://localhost:4000/");
        config.session_cookie = Some(SecretString::from("bad\ncookie"));
        assert!(matches!(
            HttpBackend::new(&config),
            Err(ApiError::InvalidCookie(_))
        ));
    }
}
