//! Learning platform HTTP mock endpoint creation utilities.
//!
//! Each method registers mock endpoints on the test server that answer the way the platform
//! does, and verify they were called exactly `expected_requests` times.

use ::mockito::{Matcher, Mock};
use serde_json::Value;

use crate::{
    constant::{
        TEST_ACCESS_TOKEN, TEST_CSRF_TOKEN, TEST_LOGIN_PAGE_COOKIE, TEST_MENTOR_EMAIL,
        TEST_MENTOR_ID, TEST_SESSION_COOKIE,
    },
    fixtures::{factory, platform::PlatformFixtures},
};

fn bearer() -> String {
    format!("Bearer {}", TEST_ACCESS_TOKEN)
}

fn session_cookie() -> String {
    format!("PHPSESSID={}", TEST_SESSION_COOKIE)
}

fn sessions_path() -> String {
    format!("/users/{}/sessions", TEST_MENTOR_ID)
}

impl<'a> PlatformFixtures<'a> {
    /// Create a mock `GET /me` endpoint accepting only [`TEST_ACCESS_TOKEN`].
    ///
    /// Other tokens are not matched and receive mockito's default error answer.
    pub fn create_me_endpoint(&mut self, expected_requests: usize) -> Mock {
        let identity = factory::platform_identity(TEST_MENTOR_ID, TEST_MENTOR_EMAIL);

        self.setup
            .server
            .mock("GET", "/me")
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(identity.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint for one page of the mentor's session listing.
    ///
    /// Matches the `Range` header exactly and answers `206 Partial Content` with a
    /// `Content-Range` header carrying `total`.
    ///
    /// # Arguments
    /// - `range` - Expected `Range` header, e.g. `items=0-19`
    /// - `sessions` - Page content, see [`factory::platform_session`]
    /// - `total` - Total number of sessions across all pages
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_sessions_page_endpoint(
        &mut self,
        range: &str,
        sessions: Vec<Value>,
        total: u64,
        expected_requests: usize,
    ) -> Mock {
        let bounds = range.trim_start_matches("items=");
        let content_range = format!("items {}/{}", bounds, total);

        self.setup
            .server
            .mock("GET", sessions_path().as_str())
            .match_query(Matcher::UrlEncoded("actor".into(), "expert".into()))
            .match_header("authorization", bearer().as_str())
            .match_header("range", range)
            .with_status(206)
            .with_header("content-type", "application/json")
            .with_header("content-range", content_range.as_str())
            .with_body(Value::Array(sessions).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock session listing answering `416 Range Not Satisfiable` to any range.
    pub fn create_empty_sessions_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("GET", sessions_path().as_str())
            .match_query(Matcher::Any)
            .match_header("range", Matcher::Regex("^items=".to_string()))
            .with_status(416)
            .expect(expected_requests)
            .create()
    }

    /// Create a mock lookup of pending sessions within a time window.
    ///
    /// Matches listing requests without a `Range` header that filter on `pending` and pass
    /// an `after` bound, and answers `200 OK` with `sessions`.
    pub fn create_find_session_endpoint(
        &mut self,
        sessions: Vec<Value>,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", sessions_path().as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("life-cycle-status".into(), "pending".into()),
                Matcher::Regex("after=".to_string()),
                Matcher::Regex("before=".to_string()),
            ]))
            .match_header("range", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(Value::Array(sessions).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create mock dashboard and profile endpoints for a student.
    ///
    /// # Arguments
    /// - `student_id` - Platform id of the student
    /// - `billing_status` - Status shown on the dashboard, `None` to omit the status block
    /// - `expected_requests` - Number of times each endpoint should be called
    ///
    /// # Returns
    /// - `Vec<Mock>` - The dashboard and profile mocks
    pub fn create_student_endpoints(
        &mut self,
        student_id: i64,
        billing_status: Option<&str>,
        expected_requests: usize,
    ) -> Vec<Mock> {
        let dashboard = format!("/fr/mentorship/students/{}/dashboard", student_id);
        let profile = format!("/users/{}", student_id);

        vec![
            self.setup
                .server
                .mock("GET", dashboard.as_str())
                .match_header("cookie", session_cookie().as_str())
                .with_status(200)
                .with_header("content-type", "text/html; charset=UTF-8")
                .with_body(factory::student_dashboard(billing_status))
                .expect(expected_requests)
                .create(),
            self.setup
                .server
                .mock("GET", profile.as_str())
                .match_header("authorization", bearer().as_str())
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(factory::platform_user(student_id).to_string())
                .expect(expected_requests)
                .create(),
        ]
    }

    /// Create a mock booking endpoint answering with `status`, `201` on success.
    pub fn create_schedule_endpoint(&mut self, status: usize, expected_requests: usize) -> Mock {
        let body = if status == 201 {
            "{}".to_string()
        } else {
            serde_json::json!({ "errors": [{ "message": "Slot is not available" }] }).to_string()
        };

        self.setup
            .server
            .mock("POST", "/api/mentorship-sessions")
            .match_header("cookie", session_cookie().as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create()
    }

    /// Create a mock cancellation endpoint for a session answering with `status`.
    pub fn create_cancel_endpoint(
        &mut self,
        session_id: i64,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/api/mentorship-sessions/{}/cancel", session_id);

        self.setup
            .server
            .mock("POST", url.as_str())
            .match_header("cookie", session_cookie().as_str())
            .match_body(Matcher::PartialJson(serde_json::json!({ "late": false })))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .expect(expected_requests)
            .create()
    }

    /// Create mock login page and login check endpoints.
    ///
    /// The login page sets [`TEST_LOGIN_PAGE_COOKIE`] and returns [`TEST_CSRF_TOKEN`]. The
    /// login check requires both and answers with `status`; on `200` it sets
    /// [`TEST_SESSION_COOKIE`] and [`TEST_ACCESS_TOKEN`] as cookies.
    ///
    /// # Returns
    /// - `Vec<Mock>` - The login page and login check mocks
    pub fn create_login_endpoints(&mut self, status: usize, expected_requests: usize) -> Vec<Mock> {
        let login_page = self
            .setup
            .server
            .mock("GET", "/fr/login_ajax")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header(
                "set-cookie",
                &format!("PHPSESSID={}; path=/; HttpOnly", TEST_LOGIN_PAGE_COOKIE),
            )
            .with_body(serde_json::json!({ "csrf": TEST_CSRF_TOKEN }).to_string())
            .expect(expected_requests)
            .create();

        let login_check = self
            .setup
            .server
            .mock("POST", "/login_check")
            .match_header("cookie", format!("PHPSESSID={}", TEST_LOGIN_PAGE_COOKIE).as_str())
            .match_header("x-requested-with", "XMLHttpRequest")
            .match_body(Matcher::UrlEncoded("state".into(), TEST_CSRF_TOKEN.into()))
            .with_status(status)
            .with_header("content-type", "application/json");

        let login_check = if status == 200 {
            login_check
                .with_header(
                    "set-cookie",
                    &format!("PHPSESSID={}; path=/; HttpOnly", TEST_SESSION_COOKIE),
                )
                .with_header(
                    "set-cookie",
                    &format!("access_token={}; path=/", TEST_ACCESS_TOKEN),
                )
                .with_body("{}")
        } else {
            login_check.with_body(serde_json::json!({ "error": "Bad credentials" }).to_string())
        };

        vec![login_page, login_check.expect(expected_requests).create()]
    }
}
