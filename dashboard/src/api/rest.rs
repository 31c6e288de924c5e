//! REST implementation of [`EntityGateway`]

use super::{EntityGateway, EntityId, GatewayFuture, ListEnvelope, ListQuery, Resource};
use crate::config::DashboardConfig;
use crate::error::ApiError;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

/// Backoffice REST client
///
/// One client serves every resource; the resource type picks the path.
///
/// | call | request |
/// |---|---|
/// | list | `GET {base}/{path}?page=N[&scope=id]` |
/// | create | `POST {base}/{path}` |
/// | update | `PATCH {base}/{path}/{id}` |
/// | delete | `DELETE {base}/{path}/{id}` |
#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl RestClient {
    /// Create a client for the given base URL with default HTTP settings
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
        }
    }

    /// Create a client from validated configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestFailed` if the HTTP client cannot be built
    pub fn from_config(config: &DashboardConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Send `Authorization: Bearer {token}` with every request
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    fn member_url<R: Resource>(&self, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, R::PATH, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Map a non-success status to an [`ApiError`]
async fn check_status(response: Response, target: String) -> Result<Response, ApiError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(target)),
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Api {
                status: status.as_u16(),
                message: body,
            })
        },
    }
}

impl<R: Resource> EntityGateway<R> for RestClient {
    fn list(&self, query: ListQuery) -> GatewayFuture<Vec<R>> {
        let mut params = vec![("page", query.page.to_string())];
        if let (Some(name), Some(scope)) = (R::SCOPE_PARAM, query.scope) {
            params.push((name, scope.to_string()));
        }
        let request = self.authorize(self.client.get(self.collection_url::<R>()).query(&params));

        Box::pin(async move {
            tracing::debug!(resource = R::PATH, page = query.page, scope = ?query.scope, "Listing");

            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            let response = check_status(response, R::PATH.to_string()).await?;

            let envelope = response
                .json::<ListEnvelope<R>>()
                .await
                .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))?;
            Ok(envelope.into_items())
        })
    }

    fn create(&self, draft: R::Draft) -> GatewayFuture<()> {
        let request = self.authorize(self.client.post(self.collection_url::<R>()).json(&draft));

        Box::pin(async move {
            tracing::debug!(resource = R::PATH, "Creating");

            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            check_status(response, R::PATH.to_string()).await?;
            Ok(())
        })
    }

    fn update(&self, id: EntityId, draft: R::Draft) -> GatewayFuture<()> {
        let request = self.authorize(self.client.patch(self.member_url::<R>(id)).json(&draft));

        Box::pin(async move {
            tracing::debug!(resource = R::PATH, %id, "Updating");

            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            check_status(response, format!("{}/{id}", R::PATH)).await?;
            Ok(())
        })
    }

    fn delete(&self, id: EntityId) -> GatewayFuture<()> {
        let request = self.authorize(self.client.delete(self.member_url::<R>(id)));

        Box::pin(async move {
            tracing::debug!(resource = R::PATH, %id, "Deleting");

            let response = request
                .send()
                .await
                .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
            check_status(response, format!("{}/{id}", R::PATH)).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::{Company, Reservation};

    #[test]
    fn client_trims_trailing_slash() {
        let client = RestClient::new("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(
            client.collection_url::<Company>(),
            "http://localhost:3000/api/companies"
        );
        assert_eq!(
            client.member_url::<Reservation>(EntityId::new(9)),
            "http://localhost:3000/api/reservations/9"
        );
    }

    #[test]
    fn client_from_config_keeps_token() {
        let config = DashboardConfig {
            api_token: Some("t0k".to_string()),
            ..DashboardConfig::default()
        };
        let client = RestClient::from_config(&config).unwrap();
        assert_eq!(client.api_token.as_deref(), Some("t0k"));
        assert_eq!(client.base_url(), crate::config::DEFAULT_API_URL);
    }
}
