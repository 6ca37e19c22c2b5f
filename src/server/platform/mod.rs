//! Client for the learning platform.
//!
//! The platform exposes a JSON API authenticated with a bearer token and a website
//! authenticated with the `PHPSESSID` session cookie. Session listings and user profiles come
//! from the API; scheduling, cancelling and the student billing status go through the website.
//! Every call takes the [`PlatformCredentials`] of the request being served.
//!
//! No call is retried. A status the operation does not accept is reported as
//! [`PlatformError::Upstream`] with the status and body the platform returned.

pub mod model;

use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use reqwest::{header, Response, StatusCode};

use crate::{
    model::{session::SessionDto, student::StudentDto},
    server::{
        error::platform::PlatformError,
        model::auth::PlatformCredentials,
        platform::model::{
            CancelRequest, LoginPage, PlatformIdentity, PlatformLogin, PlatformSession,
            PlatformUser, ScheduleRequest, SessionPage,
        },
        service::pricing::UNKNOWN_FUNDING,
        util::range::{page_ranges, parse_content_range_total, PageRange, PAGE_SIZE},
    },
};

/// Lifecycle statuses requested when listing every session of the mentor.
const ALL_LIFE_CYCLE_STATUSES: &str =
    "canceled,completed,late canceled,marked student as absent,pending";

/// Session cookie name of the platform website.
const SESSION_COOKIE: &str = "PHPSESSID";
/// Cookie carrying the API token after a login.
const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Billing status block of the student dashboard, matched on HTML with newlines removed.
static BILLING_STATUS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<div class="mentorshipStudent__details oc-typography-body1"><p>([^<]+)</p>"#)
        .expect("Invalid billing status pattern")
});

/// Reads the billing status from a student dashboard page.
///
/// Returns `None` when the page has no status block, otherwise the trimmed status text.
pub fn extract_billing_status(html: &str) -> Option<String> {
    let html = html.replace('\n', "");

    BILLING_STATUS_PATTERN
        .captures(&html)
        .and_then(|captures| captures.get(1))
        .map(|status| status.as_str().trim().to_string())
}

#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    api_url: String,
    site_url: String,
}

impl PlatformClient {
    /// Creates a client for the platform API and website base URLs
    pub fn new(http: reqwest::Client, api_url: &str, site_url: &str) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn site(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }

    /// Logs into the platform website with the mentor's email and password.
    ///
    /// Fetches the login page for a session cookie and CSRF token, then posts the credentials
    /// as the website's own login form does.
    ///
    /// # Returns
    /// - `Ok(PlatformLogin)` - Session cookie and access token set by the platform
    /// - `Err(PlatformError::Upstream)` - The platform refused the credentials
    /// - `Err(PlatformError::MissingCookie)` - A response lacked an expected cookie
    pub async fn login(&self, username: &str, password: &str) -> Result<PlatformLogin, PlatformError> {
        let url = self.site("/fr/login_ajax");
        let response = self.http.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(upstream_error(url, response).await);
        }

        let login_cookie =
            response_cookie(&response, SESSION_COOKIE).ok_or(PlatformError::MissingCookie(SESSION_COOKIE))?;
        let page: LoginPage = response.json().await?;

        let url = self.site("/login_check");
        let response = self
            .http
            .post(&url)
            .header("x-requested-with", "XMLHttpRequest")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, login_cookie))
            .form(&[
                ("_username", username),
                ("_password", password),
                ("state", page.csrf.as_str()),
            ])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(upstream_error(url, response).await);
        }

        let session_id =
            response_cookie(&response, SESSION_COOKIE).ok_or(PlatformError::MissingCookie(SESSION_COOKIE))?;
        let access_token = response_cookie(&response, ACCESS_TOKEN_COOKIE)
            .ok_or(PlatformError::MissingCookie(ACCESS_TOKEN_COOKIE))?;

        Ok(PlatformLogin {
            session_id,
            access_token,
        })
    }

    /// Resolves the identity behind a bearer token, `None` if the platform rejects the token.
    pub async fn me(&self, token: &str) -> Result<Option<PlatformIdentity>, PlatformError> {
        let response = self.http.get(self.api("/me")).bearer_auth(token).send().await?;

        if response.status() != StatusCode::OK {
            tracing::debug!(status = %response.status(), "Platform rejected bearer token");
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }

    /// Fetches one page of the mentor's sessions.
    ///
    /// A `416 Range Not Satisfiable` answer is an empty listing. Entries that cannot be
    /// decoded are skipped.
    pub async fn sessions_page(
        &self,
        credentials: &PlatformCredentials,
        range: PageRange,
    ) -> Result<SessionPage, PlatformError> {
        let url = self.api(&format!("/users/{}/sessions", credentials.user_id));
        let response = self
            .http
            .get(&url)
            .bearer_auth(&credentials.token)
            .header(header::RANGE, range.header_value())
            .query(&[("actor", "expert"), ("life-cycle-status", ALL_LIFE_CYCLE_STATUSES)])
            .send()
            .await?;

        match response.status() {
            StatusCode::PARTIAL_CONTENT => {
                let content_range = response
                    .headers()
                    .get(header::CONTENT_RANGE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let total = parse_content_range_total(&content_range)
                    .ok_or(PlatformError::InvalidContentRange(content_range))?;
                let values: Vec<serde_json::Value> = response.json().await?;

                Ok(SessionPage {
                    sessions: decode_sessions(values),
                    total,
                })
            }
            StatusCode::RANGE_NOT_SATISFIABLE => Ok(SessionPage::default()),
            _ => Err(upstream_error(url, response).await),
        }
    }

    /// Fetches every session of the mentor, page by page.
    pub async fn all_sessions(
        &self,
        credentials: &PlatformCredentials,
    ) -> Result<Vec<SessionDto>, PlatformError> {
        let first = self
            .sessions_page(
                credentials,
                PageRange {
                    first: 0,
                    last: PAGE_SIZE - 1,
                },
            )
            .await?;

        let mut sessions = first.sessions;
        for range in page_ranges(first.total).into_iter().skip(1) {
            let page = self.sessions_page(credentials, range).await?;
            sessions.extend(page.sessions);
        }

        tracing::debug!(
            "Fetched {} of {} platform sessions",
            sessions.len(),
            first.total
        );

        Ok(sessions.into_iter().map(SessionDto::from).collect())
    }

    /// Finds the session with `status` starting within one minute of `at`.
    pub async fn find_session(
        &self,
        credentials: &PlatformCredentials,
        status: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<SessionDto>, PlatformError> {
        let after = (at - Duration::minutes(1)).format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let before = (at + Duration::minutes(1)).format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let url = self.api(&format!("/users/{}/sessions", credentials.user_id));
        let response = self
            .http
            .get(&url)
            .bearer_auth(&credentials.token)
            .query(&[
                ("actor", "expert"),
                ("life-cycle-status", status),
                ("after", after.as_str()),
                ("before", before.as_str()),
            ])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(upstream_error(url, response).await);
        }

        let values: Vec<serde_json::Value> = response.json().await?;

        Ok(decode_sessions(values).into_iter().next().map(SessionDto::from))
    }

    /// Fetches a student's profile and billing status.
    pub async fn student(
        &self,
        credentials: &PlatformCredentials,
        student_id: i64,
    ) -> Result<StudentDto, PlatformError> {
        let status = self.student_billing_status(credentials, student_id).await?;

        let url = self.api(&format!("/users/{}", student_id));
        let response = self
            .http
            .get(&url)
            .bearer_auth(&credentials.token)
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(upstream_error(url, response).await);
        }

        let user: PlatformUser = response.json().await?;

        Ok(user.into_student(status))
    }

    /// Scrapes a student's billing status from their dashboard on the website.
    ///
    /// # Returns
    /// - `Ok(String)` - The status shown on the dashboard, or `Ext` when none is shown
    /// - `Err(PlatformError::UnparseableStudentStatus)` - The status block is blank
    pub async fn student_billing_status(
        &self,
        credentials: &PlatformCredentials,
        student_id: i64,
    ) -> Result<String, PlatformError> {
        let url = self.site(&format!("/fr/mentorship/students/{}/dashboard", student_id));
        let response = self
            .http
            .get(&url)
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, credentials.cookie))
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(upstream_error(url, response).await);
        }

        let html = response.text().await?;

        match extract_billing_status(&html) {
            None => Ok(UNKNOWN_FUNDING.to_string()),
            Some(status) if status.is_empty() => {
                Err(PlatformError::UnparseableStudentStatus(student_id))
            }
            Some(status) => Ok(status),
        }
    }

    /// Books a session with a student, the platform answers `201 Created` on success.
    pub async fn schedule_session(
        &self,
        credentials: &PlatformCredentials,
        student_id: i64,
        session_date: DateTime<Utc>,
    ) -> Result<(), PlatformError> {
        let request = ScheduleRequest {
            student_id,
            mentor_id: credentials.user_id,
            session_date: model::format_platform_date(session_date),
            is_defense: false,
        };

        let url = self.site("/api/mentorship-sessions");
        let response = self
            .http
            .post(&url)
            .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
            .header("x-requested-with", "XMLHttpRequest")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, credentials.cookie))
            .body(serde_json::to_string(&request)?)
            .send()
            .await?;
        if response.status() != StatusCode::CREATED {
            return Err(upstream_error(url, response).await);
        }

        Ok(())
    }

    /// Cancels a session on the platform.
    ///
    /// Returns whether the platform accepted the cancellation; a refusal is logged but is
    /// not an error, so callers can keep sessions the platform did not cancel.
    pub async fn cancel_session(
        &self,
        credentials: &PlatformCredentials,
        session_id: i64,
    ) -> Result<bool, PlatformError> {
        let url = self.site(&format!("/api/mentorship-sessions/{}/cancel", session_id));
        let response = self
            .http
            .post(&url)
            .header("x-requested-with", "XMLHttpRequest")
            .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, credentials.cookie))
            .json(&CancelRequest {
                late: false,
                student_facing_note: None,
            })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(session_id = %session_id, status = %status, "Platform refused cancellation: {}", body);

            return Ok(false);
        }

        Ok(true)
    }
}

fn response_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

async fn upstream_error(url: String, response: Response) -> PlatformError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    PlatformError::Upstream { url, status, body }
}

fn decode_sessions(values: Vec<serde_json::Value>) -> Vec<PlatformSession> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<PlatformSession>(value) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Skipping undecodable platform session: {}", e);
                None
            }
        })
        .collect()
}
