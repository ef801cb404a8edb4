use crate::error::{ClientError, Result};
use crate::types::{SolveRequest, SolveResult};
use reqwest::{Client, StatusCode, Url};

/// HTTP client for interacting with the MILP Solve API
#[derive(Debug, Clone)]
pub struct SolverClient {
    client: Client,
    base_url: Url,
}

impl SolverClient {
    /// Create a new MILP Solve API client
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:9000")
    ///
    /// # Example
    ///
    /// ```no_run
    /// use milp_solve_sdk::SolverClient;
    ///
    /// let client = SolverClient::new("http://localhost:9000").unwrap();
    /// ```
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom reqwest client
    ///
    /// This allows you to configure timeouts, proxies, etc.
    pub fn with_client(base_url: impl AsRef<str>, client: Client) -> Result<Self> {
        let base_url =
            Url::parse(base_url.as_ref()).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// Check the health of the API server
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use milp_solve_sdk::SolverClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = SolverClient::new("http://localhost:9000")?;
    /// let is_healthy = client.health_check().await?;
    /// println!("Server healthy: {}", is_healthy);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn health_check(&self) -> Result<bool> {
        let response = self.client.get(self.endpoint("/health")?).send().await?;
        Ok(response.status().is_success())
    }

    /// Solve an integer linear program
    ///
    /// Every well-formed request yields a `SolveResult`, including
    /// infeasible and invalid models; only transport failures and
    /// rejected request bodies surface as errors.
    pub async fn solve(&self, request: &SolveRequest) -> Result<SolveResult> {
        let response = self
            .client
            .post(self.endpoint("/solve")?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status {
                StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(body),
                _ => ClientError::ApiError {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }
}
