//! LMS client
//!
//! One method per logical operation. Each call validates its options, builds
//! the request URL from the endpoint catalog and then either returns a
//! single mapped page or drives a [`PageCursor`] to collect every page.
//!
//! ```rust,ignore
//! use lms_client::{CallOptions, ClientConfig, Credentials, LmsClient};
//!
//! let client = LmsClient::from_config(ClientConfig::default())?;
//! let creds = Credentials::new(host, client_id, client_secret, access, refresh);
//! let options = CallOptions::new(creds).per_page(50).param("courseId", 4);
//! let enrollments = client.course_enrollments(&options, None).await?;
//! ```

mod options;

pub use options::CallOptions;

use crate::auth::{AccessTokenListener, Requester};
use crate::catalog::{EndpointCatalog, Operation};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ReqwestTransport, Transport};
use crate::mapping::{course_map, enrollment_map, exam_map, format_response, FieldMap};
use crate::pagination::{collect_all, PageCursor};
use crate::template::{build_url, query_key, value_to_string};
use crate::types::{JsonObject, JsonValue, QueryParams, RequestOptions};
use crate::validate::{validate_credentials, validate_pagination, validate_params};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Listener handed to a single call
pub type Listener = Option<Arc<dyn AccessTokenListener>>;

/// Client for the LMS REST API
pub struct LmsClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
    catalog: EndpointCatalog,
}

impl LmsClient {
    /// Create a client over an existing transport
    pub fn new(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let catalog = config.catalog();
        Self {
            transport,
            config,
            catalog,
        }
    }

    /// Create a client with a reqwest transport built from `config.http`
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::with_config(config.http.clone())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint catalog, overrides applied
    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    /// Issue the first request of an operation and return its cursor
    pub async fn list(
        &self,
        operation: Operation,
        options: &CallOptions,
        listener: Listener,
    ) -> Result<PageCursor> {
        let request = self.prepare(operation, options, &[])?;
        let mut cursor = PageCursor::new(self.requester(options, listener));
        cursor.request(request).await?;
        Ok(cursor)
    }

    /// Enrollments of a course, each merged with its user record
    pub async fn course_enrollments(
        &self,
        options: &CallOptions,
        listener: Listener,
    ) -> Result<Vec<JsonValue>> {
        info!("Fetching enrollments for {:?}", options.params.get("courseId"));

        let enrollments_request = self.prepare(Operation::CourseEnrollments, options, &[])?;
        let users_request =
            self.prepare(Operation::CourseUsers, options, &[("include[]", "email")])?;

        // Both collections share one requester so a refresh during the
        // first is seen by the second.
        let requester = self.requester(options, listener);
        let (enrollments, requester) = self.collect(requester, enrollments_request).await?;
        let (users, _) = self.collect(requester, users_request).await?;

        let merged = merge_users(enrollments, &users);
        Ok(map_all(&merged, &enrollment_map()))
    }

    /// Exams (quizzes) of a course
    pub async fn course_exams(
        &self,
        options: &CallOptions,
        listener: Listener,
    ) -> Result<Vec<JsonValue>> {
        self.collect_operation(Operation::CourseExams, options, listener)
            .await
    }

    /// External tools installed on a course
    pub async fn course_external_tools(
        &self,
        options: &CallOptions,
        listener: Listener,
    ) -> Result<Vec<JsonValue>> {
        self.collect_operation(Operation::CourseExternalTools, options, listener)
            .await
    }

    /// External tools installed on an account
    pub async fn account_external_tools(
        &self,
        options: &CallOptions,
        listener: Listener,
    ) -> Result<Vec<JsonValue>> {
        self.collect_operation(Operation::AccountExternalTools, options, listener)
            .await
    }

    /// A single exam, mapped
    pub async fn get_exam(&self, options: &CallOptions, listener: Listener) -> Result<JsonValue> {
        self.single(Operation::GetExam, options, listener, &exam_map())
            .await
    }

    /// Course details, mapped
    pub async fn get_course_details(
        &self,
        options: &CallOptions,
        listener: Listener,
    ) -> Result<JsonValue> {
        self.single(Operation::GetCourseDetails, options, listener, &course_map())
            .await
    }

    async fn single(
        &self,
        operation: Operation,
        options: &CallOptions,
        listener: Listener,
        map: &FieldMap,
    ) -> Result<JsonValue> {
        let cursor = self.list(operation, options, listener).await?;
        Ok(format_response(&cursor.current()?.results, map))
    }

    async fn collect_operation(
        &self,
        operation: Operation,
        options: &CallOptions,
        listener: Listener,
    ) -> Result<Vec<JsonValue>> {
        let request = self.prepare(operation, options, &[])?;
        let (results, _) = self
            .collect(self.requester(options, listener), request)
            .await?;
        info!("{operation}: collected {} records", results.len());
        Ok(results)
    }

    async fn collect(
        &self,
        requester: Requester,
        request: RequestOptions,
    ) -> Result<(Vec<JsonValue>, Requester)> {
        let mut cursor = PageCursor::new(requester);
        cursor.request(request).await?;
        let results = collect_all(&mut cursor, self.config.max_pages).await?;
        Ok((results, cursor.into_requester()))
    }

    fn requester(&self, options: &CallOptions, listener: Listener) -> Requester {
        let requester = Requester::new(self.transport.clone(), options.credentials.clone())
            .with_policy(self.config.unauthorized_policy);
        match listener {
            Some(listener) => requester.with_listener(listener),
            None => requester,
        }
    }

    /// Validate options and build the request for an operation
    fn prepare(
        &self,
        operation: Operation,
        options: &CallOptions,
        extra_query: &[(&str, &str)],
    ) -> Result<RequestOptions> {
        validate_credentials(&options.credentials)?;
        validate_pagination(options.page, options.per_page)?;

        let endpoint = self.catalog.get(operation);
        validate_params(endpoint, &options.params)?;

        let template = format!(
            "{}{}",
            options.credentials.host.trim_end_matches('/'),
            endpoint.endpoint
        );

        let mut query: QueryParams = options
            .pagination_query()
            .into_iter()
            .map(|(key, value)| (query_key(key), value))
            .collect();
        query.extend(
            extra_query
                .iter()
                .map(|(key, value)| (query_key(key), JsonValue::from(*value))),
        );

        let url = build_url(&template, &options.params, &query);
        debug!("{operation} -> {} {url}", endpoint.method);

        Ok(RequestOptions::new(endpoint.method, url))
    }
}

impl std::fmt::Debug for LmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Copy each user's fields into the `user` object of its enrollments
///
/// Users are matched on `enrollment.user_id == user.id`. Enrollments without
/// a matching user are left as they are.
fn merge_users(enrollments: Vec<JsonValue>, users: &[JsonValue]) -> Vec<JsonValue> {
    let users_by_id: HashMap<String, &JsonObject> = users
        .iter()
        .filter_map(|user| {
            let record = user.as_object()?;
            let id = record.get("id")?;
            Some((value_to_string(id), record))
        })
        .collect();

    enrollments
        .into_iter()
        .map(|mut enrollment| {
            let user = enrollment
                .get("user_id")
                .map(value_to_string)
                .and_then(|id| users_by_id.get(&id).copied());

            if let (Some(user), Some(record)) = (user, enrollment.as_object_mut()) {
                let target = record
                    .entry("user")
                    .or_insert_with(|| JsonValue::Object(JsonObject::new()));
                if !target.is_object() {
                    *target = JsonValue::Object(JsonObject::new());
                }
                if let Some(target) = target.as_object_mut() {
                    target.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
            }
            enrollment
        })
        .collect()
}

fn map_all(records: &[JsonValue], map: &FieldMap) -> Vec<JsonValue> {
    records
        .iter()
        .map(|record| format_response(record, map))
        .collect()
}
