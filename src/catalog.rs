//! Endpoint catalog
//!
//! Maps each logical operation to a path template and HTTP method. The
//! built-in entries target the `/api/v1` REST surface; any of them can be
//! overridden from configuration.

use crate::template::extract_placeholders;
use crate::types::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Logical operations the client knows how to issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    CourseEnrollments,
    CourseUsers,
    CourseExams,
    CourseExternalTools,
    AccountExternalTools,
    GetExam,
    GetCourseDetails,
}

impl Operation {
    /// All operations
    pub const ALL: [Operation; 7] = [
        Operation::CourseEnrollments,
        Operation::CourseUsers,
        Operation::CourseExams,
        Operation::CourseExternalTools,
        Operation::AccountExternalTools,
        Operation::GetExam,
        Operation::GetCourseDetails,
    ];

    /// Operation name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CourseEnrollments => "courseEnrollments",
            Operation::CourseUsers => "courseUsers",
            Operation::CourseExams => "courseExams",
            Operation::CourseExternalTools => "courseExternalTools",
            Operation::AccountExternalTools => "accountExternalTools",
            Operation::GetExam => "getExam",
            Operation::GetCourseDetails => "getCourseDetails",
        }
    }

    /// Built-in endpoint for this operation
    pub fn default_endpoint(&self) -> Endpoint {
        let path = match self {
            Operation::CourseEnrollments => "/api/v1/courses/{courseId}/enrollments",
            Operation::CourseUsers => "/api/v1/courses/{courseId}/users",
            Operation::CourseExams => "/api/v1/courses/{courseId}/quizzes",
            Operation::CourseExternalTools => "/api/v1/courses/{courseId}/external_tools",
            Operation::AccountExternalTools => "/api/v1/accounts/{accountId}/external_tools",
            Operation::GetExam => "/api/v1/courses/{courseId}/quizzes/{quizId}",
            Operation::GetCourseDetails => "/api/v1/courses/{courseId}",
        };
        Endpoint::new(Method::GET, path)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path template and verb for one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Path template relative to the host, with `{name}` placeholders
    pub endpoint: String,
    /// HTTP method
    #[serde(default)]
    pub method: Method,
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
        }
    }

    /// Placeholder names the template requires
    pub fn path_params(&self) -> Vec<String> {
        extract_placeholders(&self.endpoint)
    }
}

/// Operation -> endpoint lookup
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointCatalog {
    endpoints: HashMap<Operation, Endpoint>,
}

impl Default for EndpointCatalog {
    fn default() -> Self {
        Self {
            endpoints: Operation::ALL
                .iter()
                .map(|op| (*op, op.default_endpoint()))
                .collect(),
        }
    }
}

impl EndpointCatalog {
    /// Built-in catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in catalog with some entries replaced
    pub fn with_overrides(overrides: &HashMap<Operation, Endpoint>) -> Self {
        let mut catalog = Self::default();
        for (op, endpoint) in overrides {
            catalog.endpoints.insert(*op, endpoint.clone());
        }
        catalog
    }

    /// Endpoint for an operation
    pub fn get(&self, operation: Operation) -> &Endpoint {
        // Every operation is present: the map starts from Operation::ALL
        // and overrides only replace entries.
        &self.endpoints[&operation]
    }
}
