use async_trait::async_trait;
use dashboard_core::{ApiError, ExpenseApi, ExpenseQuery, PeriodQuery};
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{CreateExpenseRequest, Expense, Insight, Summary, UpdateExpenseRequest};

use super::auth;

/// HTTP client for the expense backend
#[derive(Clone, PartialEq)]
pub struct HttpExpenseApi {
    base_url: String,
}

impl HttpExpenseApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token when the user is signed in
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match auth::access_token() {
            Some(token) => builder.header("Authorization", &auth::bearer(&token)),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await
    }

    async fn send_json<B: serde::Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<Response, ApiError> {
        let request = self
            .authorize(builder)
            .json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(response.status(), body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ExpenseApi for HttpExpenseApi {
    async fn list_expenses(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, ApiError> {
        let builder = Request::get(&self.endpoint("expenses/")).query(query.to_query_pairs());
        read_json(self.send(builder).await?).await
    }

    async fn create_expense(&self, request: &CreateExpenseRequest) -> Result<Expense, ApiError> {
        let builder = Request::post(&self.endpoint("expenses/"));
        read_json(self.send_json(builder, request).await?).await
    }

    async fn update_expense(
        &self,
        id: i64,
        request: &UpdateExpenseRequest,
    ) -> Result<Expense, ApiError> {
        let builder = Request::put(&self.endpoint(&format!("expenses/{}/", id)));
        read_json(self.send_json(builder, request).await?).await
    }

    async fn delete_expense(&self, id: i64) -> Result<(), ApiError> {
        let builder = Request::delete(&self.endpoint(&format!("expenses/{}/", id)));
        self.send(builder).await?;
        Ok(())
    }

    async fn summary(&self, query: &PeriodQuery) -> Result<Summary, ApiError> {
        let builder =
            Request::get(&self.endpoint("expenses/summary/")).query(query.to_query_pairs());
        read_json(self.send(builder).await?).await
    }

    async fn insights(&self, query: &PeriodQuery) -> Result<Insight, ApiError> {
        let builder =
            Request::get(&self.endpoint("expenses/insights/")).query(query.to_query_pairs());
        read_json(self.send(builder).await?).await
    }
}
