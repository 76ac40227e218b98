//! RegexSolver API client.
//!
//! Every remote operation is a single JSON `POST`:
//! - No retries and no timeout beyond what the transport applies
//! - Any failure (network, non-2xx status, unexpected body) becomes an [`ApiError`]
//!
//! A [`RegexSolver`] is cheap to clone and can be shared between tasks. For
//! "configure once, use everywhere" setups, [`RegexSolver::initialize`] installs
//! a process-wide instance retrievable with [`RegexSolver::get_instance`].
//!
//! # Example
//!
//! ```rust,no_run
//! use regexsolver::{RegexSolver, Term};
//!
//! # async fn run() -> regexsolver::ApiResult<()> {
//! RegexSolver::initialize("my-token", None)?;
//! let solver = RegexSolver::get_instance().expect("initialized above");
//!
//! let result = Term::regex("(abc|de){2}")
//!     .intersection(&solver, &[Term::regex("de.*"), Term::regex(".*abc")])
//!     .await?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::config::SolverConfig;
use crate::details::Details;
use crate::term::Term;
use crate::wire::{
    DetailsJson, ErrorResponse, GenerateStringsRequest, MultiTermsRequest, TermJson, ValueResponse,
};

const INTERSECTION_PATH: &str = "/api/compute/intersection";
const UNION_PATH: &str = "/api/compute/union";
const SUBTRACTION_PATH: &str = "/api/compute/subtraction";
const DETAILS_PATH: &str = "/api/analyze/details";
const EQUIVALENCE_PATH: &str = "/api/analyze/equivalence";
const SUBSET_PATH: &str = "/api/analyze/subset";
const GENERATE_STRINGS_PATH: &str = "/api/generate/strings";

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a call to the RegexSolver API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The API returned the following error: {message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Underlying message, without the common prefix
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::new(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::new(err.to_string())
    }
}

static INSTANCE: RwLock<Option<RegexSolver>> = RwLock::new(None);

/// Handle on a configured RegexSolver API client
#[derive(Debug, Clone)]
pub struct RegexSolver {
    http: reqwest::Client,
    config: Arc<SolverConfig>,
}

impl RegexSolver {
    /// Build a client from `config`
    pub fn new(config: SolverConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|e| ApiError::new(format!("invalid API token: {}", e)))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ApiError::new(format!("invalid user agent: {}", e)))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Configure the process-wide instance, replacing any previous one.
    ///
    /// `base_url` defaults to the public RegexSolver API. Requests already
    /// dispatched with a previous instance are unaffected.
    pub fn initialize(api_token: &str, base_url: Option<&str>) -> ApiResult<()> {
        let mut config = SolverConfig::new(api_token);
        if let Some(base_url) = base_url.filter(|url| !url.is_empty()) {
            config = config.base_url(base_url);
        }
        Self::install(Self::new(config)?);
        Ok(())
    }

    /// Configure the process-wide instance from `REGEXSOLVER_*` environment variables
    pub fn initialize_from_env() -> ApiResult<()> {
        let config = SolverConfig::from_env().ok_or_else(|| {
            ApiError::new(format!("{} is not set", crate::config::ENV_API_TOKEN))
        })?;
        Self::install(Self::new(config)?);
        Ok(())
    }

    /// The process-wide instance, `None` until [`RegexSolver::initialize`] has been called
    pub fn get_instance() -> Option<RegexSolver> {
        match INSTANCE.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn install(solver: RegexSolver) {
        info!(base_url = %solver.config.base_url, "RegexSolver instance initialized");
        match INSTANCE.write() {
            Ok(mut guard) => *guard = Some(solver),
            Err(poisoned) => *poisoned.into_inner() = Some(solver),
        }
    }

    /// Settings this client was built with
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Intersection of all `terms`
    pub async fn compute_intersection(&self, terms: &[Term]) -> ApiResult<Term> {
        self.compute(INTERSECTION_PATH, terms).await
    }

    /// Union of all `terms`
    pub async fn compute_union(&self, terms: &[Term]) -> ApiResult<Term> {
        self.compute(UNION_PATH, terms).await
    }

    /// First term minus the second
    pub async fn compute_subtraction(&self, terms: &[Term]) -> ApiResult<Term> {
        self.compute(SUBTRACTION_PATH, terms).await
    }

    /// Cardinality, length bounds, emptiness and totality of `term`
    pub async fn get_details(&self, term: &Term) -> ApiResult<Details> {
        let response: DetailsJson = self.post(DETAILS_PATH, &TermJson::from(term)).await?;
        Details::try_from(response).map_err(ApiError::new)
    }

    /// True if all `terms` match the same language
    pub async fn equivalence(&self, terms: &[Term]) -> ApiResult<bool> {
        let response: ValueResponse<bool> = self
            .post(EQUIVALENCE_PATH, &MultiTermsRequest::new(terms))
            .await?;
        Ok(response.value)
    }

    /// True if the first term's language is included in the second's
    pub async fn subset(&self, terms: &[Term]) -> ApiResult<bool> {
        let response: ValueResponse<bool> =
            self.post(SUBSET_PATH, &MultiTermsRequest::new(terms)).await?;
        Ok(response.value)
    }

    /// Up to `count` strings matched by `term`
    pub async fn generate_strings(&self, term: &Term, count: usize) -> ApiResult<Vec<String>> {
        let request = GenerateStringsRequest {
            term: TermJson::from(term),
            count,
        };
        let response: ValueResponse<Vec<String>> =
            self.post(GENERATE_STRINGS_PATH, &request).await?;
        Ok(response.value)
    }

    async fn compute(&self, path: &str, terms: &[Term]) -> ApiResult<Term> {
        debug!(endpoint = path, terms = terms.len(), "computing");
        let response: TermJson = self.post(path, &MultiTermsRequest::new(terms)).await?;
        Ok(Term::from(response))
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = self.try_post(path, body).await;
        if let Err(err) = &result {
            warn!(endpoint = path, error = %err.message(), "request failed");
        }
        result
    }

    async fn try_post<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "sending request");

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(error) => error.message,
                Err(_) => format!("Request failed with status code {}", status.as_u16()),
            };
            return Err(ApiError::new(message));
        }

        serde_json::from_slice::<R>(&bytes).map_err(|err| {
            match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(error) => ApiError::new(error.message),
                Err(_) => ApiError::from(err),
            }
        })
    }
}
