use std::fmt;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::checkout::OrderRequest;
use crate::config::ClientConfig;
use crate::menu::MenuDocument;

use super::error::ClientError;
use super::listing::{merge_listing, AssetKind, ListingEntry};
use super::models::{
    ErrorBody, ListEnvelope, Me, MenuSummary, OrderCreated, ProfileSummary, UploadResponse,
    UserProduct,
};
use super::upload::UploadFile;

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

/// Credentials of the signed-in user
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let trimmed = token.trim();
        Self {
            token: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// REST client for the card backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| ClientError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("card-studio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn from_config(config: &ClientConfig, session: Session) -> Result<Self, ClientError> {
        Self::new(&config.api.base_url, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start an authenticated session
    pub fn login(&mut self, session: Session) {
        self.session = session;
    }

    /// Drop the session; later calls are anonymous
    pub fn logout(&mut self) {
        self.session = Session::anonymous();
    }

    /// `GET /api/me`
    pub async fn me(&self) -> Result<Me, ClientError> {
        self.get_json(&["api", "me"]).await
    }

    /// `GET /api/profiles`
    pub async fn list_profiles(&self) -> Result<Vec<ProfileSummary>, ClientError> {
        let envelope: ListEnvelope<ProfileSummary> = self.get_json(&["api", "profiles"]).await?;
        Ok(envelope.into_vec())
    }

    /// `GET /api/user-products`
    pub async fn list_user_products(&self) -> Result<Vec<UserProduct>, ClientError> {
        let envelope: ListEnvelope<UserProduct> =
            self.get_json(&["api", "user-products"]).await?;
        Ok(envelope.into_vec())
    }

    /// `GET /api/menus/my-menus`
    pub async fn list_my_menus(&self) -> Result<Vec<MenuSummary>, ClientError> {
        let envelope: ListEnvelope<MenuSummary> =
            self.get_json(&["api", "menus", "my-menus"]).await?;
        Ok(envelope.into_vec())
    }

    /// Everything the user owns, newest first
    pub async fn unified_listing(&self) -> Result<Vec<ListingEntry>, ClientError> {
        let (profiles, products, menus) = tokio::try_join!(
            self.list_profiles(),
            self.list_user_products(),
            self.list_my_menus()
        )?;
        Ok(merge_listing(profiles, products, menus))
    }

    /// `POST /api/profiles/upload-temp`
    pub async fn upload_profile_image(&self, file: &UploadFile) -> Result<UploadResponse, ClientError> {
        self.upload(&["api", "profiles", "upload-temp"], file).await
    }

    /// `POST /api/upload/logo`
    pub async fn upload_logo(&self, file: &UploadFile) -> Result<UploadResponse, ClientError> {
        self.upload(&["api", "upload", "logo"], file).await
    }

    /// `GET /api/menu/:slug`; a missing menu is `None`
    pub async fn fetch_menu(&self, slug: &str) -> Result<Option<MenuDocument>, ClientError> {
        let url = self.endpoint(&["api", "menu", slug.trim()])?;
        let response = self.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(slug, "menu not found");
            return Ok(None);
        }
        let response = check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    /// `POST /api/orders/create`
    pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderCreated, ClientError> {
        let url = self.endpoint(&["api", "orders", "create"])?;
        let response = self.request(Method::POST, url).json(order).send().await?;
        let created: OrderCreated = check_status(response).await?.json().await?;
        debug!(order_id = created.order_id.as_str(), "order created");
        Ok(created)
    }

    /// `PATCH /api/{kind}/:id/toggle-status`; returns the new state when
    /// the backend reports it
    pub async fn toggle_status(&self, kind: AssetKind, id: &str) -> Result<Option<bool>, ClientError> {
        let url = self.endpoint(&["api", kind.resource_path(), id, "toggle-status"])?;
        let response = self.request(Method::PATCH, url).send().await?;
        let body = check_status(response).await?.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();
        let active = ["isActive", "active"]
            .iter()
            .find_map(|key| value.get(key).and_then(serde_json::Value::as_bool))
            .or_else(|| {
                value
                    .pointer("/data/isActive")
                    .and_then(serde_json::Value::as_bool)
            });
        Ok(active)
    }

    /// `DELETE /api/{kind}/:id`
    pub async fn delete_asset(&self, kind: AssetKind, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", kind.resource_path(), id])?;
        let response = self.request(Method::DELETE, url).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn upload(&self, path: &[&str], file: &UploadFile) -> Result<UploadResponse, ClientError> {
        file.validate()?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);
        let url = self.endpoint(path)?;
        let response = self.request(Method::POST, url).multipart(form).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        let response = self.request(Method::GET, url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        warn!("request rejected: unauthorized");
        return Err(ClientError::Unauthorized);
    }
    let body = response.text().await.unwrap_or_default();
    let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    warn!(status = status.as_u16(), "request failed: {message}");
    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let client = ApiClient::new("https://cards.example.com/", Session::anonymous()).unwrap();
        let url = client.endpoint(&["api", "menu", "blue cafe"]).unwrap();
        assert_eq!(url.as_str(), "https://cards.example.com/api/menu/blue%20cafe");
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let client = ApiClient::new("https://example.com/cards/", Session::anonymous()).unwrap();
        let url = client.endpoint(&["api", "me"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/cards/api/me");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::new("not a url", Session::anonymous()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut client = ApiClient::new("http://localhost:5000", Session::anonymous()).unwrap();
        assert!(!client.session().is_authenticated());
        client.login(Session::with_token(" abc "));
        assert_eq!(client.session().token(), Some("abc"));
        client.logout();
        assert_eq!(client.session().token(), None);
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let debug = format!("{:?}", Session::with_token("secret-token"));
        assert!(!debug.contains("secret-token"));
        assert!(Session::with_token("   ").token().is_none());
    }
}
