use crate::errors::ClientError;
use crate::models::{
    AuthResponse, EntriesResponse, LoginRequest, MeResponse, SavePayload, SaveResponse,
    SignupRequest, User, YearsResponse,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// The auth and persistence calls the client depends on.
pub trait HealthApi: Send + Sync {
    fn signup(
        &self,
        request: &SignupRequest,
    ) -> impl Future<Output = Result<AuthResponse, ClientError>> + Send;

    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse, ClientError>> + Send;

    fn get_me(&self, token: &str) -> impl Future<Output = Result<User, ClientError>> + Send;

    fn fetch_years(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Vec<i32>, ClientError>> + Send;

    /// Raw records; callers normalize them.
    fn fetch_entries_by_year(
        &self,
        year: i32,
        token: &str,
    ) -> impl Future<Output = Result<Vec<Value>, ClientError>> + Send;

    fn save_entry(
        &self,
        payload: &SavePayload,
        token: &str,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(ClientError::from_status(status.as_u16(), &body));
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::Decode(err.to_string()))
    }
}

impl HealthApi for ApiClient {
    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ClientError> {
        self.send(self.http.post(self.url("/api/auth/signup")).json(request))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.send(self.http.post(self.url("/api/auth/login")).json(request))
            .await
    }

    async fn get_me(&self, token: &str) -> Result<User, ClientError> {
        let me: MeResponse = self
            .send(self.http.get(self.url("/api/auth/me")).bearer_auth(token))
            .await?;
        Ok(me.user)
    }

    async fn fetch_years(&self, token: &str) -> Result<Vec<i32>, ClientError> {
        let years: YearsResponse = self
            .send(self.http.get(self.url("/api/entries/years")).bearer_auth(token))
            .await?;
        Ok(years.years)
    }

    async fn fetch_entries_by_year(&self, year: i32, token: &str) -> Result<Vec<Value>, ClientError> {
        let entries: EntriesResponse = self
            .send(
                self.http
                    .get(self.url("/api/entries"))
                    .query(&[("year", year)])
                    .bearer_auth(token),
            )
            .await?;
        Ok(entries.entries)
    }

    async fn save_entry(&self, payload: &SavePayload, token: &str) -> Result<Value, ClientError> {
        let saved: SaveResponse = self
            .send(
                self.http
                    .post(self.url("/api/entries"))
                    .json(payload)
                    .bearer_auth(token),
            )
            .await?;
        Ok(saved.entry)
    }
}
