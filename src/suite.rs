//! The ReqRes scenarios, built from one [`SuiteConfig`].

use serde_json::json;

use crate::config::SuiteConfig;
use crate::http::request::RequestSpec;
use crate::testing::{AssertionOperator, TestCase};

pub const LOGIN: &str = "login returns 200 and a token";
pub const LIST_USERS: &str = "list users returns 200 and the requested page";
pub const FETCH_USERS: &str = "fetch users returns 200 and at least 6 users";
pub const CREATE_USER: &str = "create user returns 201 with id and createdAt";
pub const DELETE_USER: &str = "delete user returns 204";

const MIN_USERS_PER_PAGE: usize = 6;

/// All five cases, in declaration order.
///
/// The delete case targets `user_id_to_delete` and not the id returned by the
/// create case.
pub fn reqres_suite(config: &SuiteConfig) -> Vec<TestCase> {
    let variables = config.variables();

    vec![
        TestCase::new(
            LOGIN,
            RequestSpec::post("/login").json(json!({
                "email": config.login_email,
                "password": config.login_password,
            })),
        )
        .expect_status(200)
        .expect_body("/token", AssertionOperator::Exists)
        .expect_body("/token", AssertionOperator::IsString)
        .expect_body("/token", AssertionOperator::NotEmpty),
        TestCase::new(
            LIST_USERS,
            RequestSpec::get("/users?page={{usersPage}}").resolve(&variables),
        )
        .expect_status(200)
        .expect_body("/data", AssertionOperator::Exists)
        .expect_body("/data", AssertionOperator::IsArray)
        .expect_body("/page", AssertionOperator::Equals(json!(config.users_page))),
        TestCase::new(
            FETCH_USERS,
            RequestSpec::get("/users?page={{usersPage}}").resolve(&variables),
        )
        .expect_status(200)
        .expect_body("/data", AssertionOperator::Exists)
        .expect_body("/data", AssertionOperator::IsArray)
        .expect_body("/data", AssertionOperator::LengthAtLeast(MIN_USERS_PER_PAGE)),
        TestCase::new(
            CREATE_USER,
            RequestSpec::post("/users").json(json!({
                "name": config.create_name,
                "job": config.create_job,
            })),
        )
        .expect_status(201)
        .expect_body("/id", AssertionOperator::Exists)
        .expect_body("/id", AssertionOperator::IsString)
        .expect_body("/id", AssertionOperator::NotEmpty)
        .expect_body("/createdAt", AssertionOperator::Exists)
        .expect_body("/createdAt", AssertionOperator::IsString)
        .expect_body("/createdAt", AssertionOperator::NotEmpty),
        TestCase::new(
            DELETE_USER,
            RequestSpec::delete("/users/{{userIdToDelete}}").resolve(&variables),
        )
        .expect_status(204),
    ]
}

/// Keep only the cases whose name contains one of `filters`. An empty filter
/// list keeps everything.
pub fn select(cases: Vec<TestCase>, filters: &[String]) -> Vec<TestCase> {
    if filters.is_empty() {
        return cases;
    }
    cases
        .into_iter()
        .filter(|case| filters.iter().any(|f| case.name.contains(f.as_str())))
        .collect()
}
