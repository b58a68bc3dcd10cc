//! Built-in field maps for the LMS resources this crate exposes

use super::types::{get_path, FieldMap};
use crate::types::JsonValue;

/// Enrollment records, after the user directory has been merged in
pub fn enrollment_map() -> FieldMap {
    FieldMap::new()
        .derive("firstName", first_name)
        .derive("lastName", last_name)
        .path("userId", "user_id")
        .path("courseId", "course_id")
        .path("emailAddress", "user.email")
        .path("enrollmentState", "enrollment_state")
        .path("role", "role")
        .path("rootAccountId", "root_account_id")
        .path("sisUserId", "sis_user_id")
}

/// Course details
pub fn course_map() -> FieldMap {
    FieldMap::new()
        .path("apiCourseId", "id")
        .path("name", "name")
        .path("accountId", "account_id")
        .path("uuid", "uuid")
        .path("startAt", "start_at")
        .path("isPublic", "is_public")
        .path("courseCode", "course_code")
        .path("defaultView", "default_view")
        .path("rootAccountId", "root_account_id")
        .path("enrollmentTermId", "enrollment_term_id")
        .path("publicSyllabus", "public_syllabus")
        .path("publicSyllabusToAuth", "public_syllabus_to_auth")
        .path("storageQuotaMb", "storage_quota_mb")
        .path("isPublicToAuthUsers", "is_public_to_auth_users")
        .path("hideFinalGrades", "hide_final_grades")
        .path("applyAssignmentGroupWeights", "apply_assignment_group_weights")
        .path("timeZone", "time_zone")
        .path("workflowState", "workflow_state")
        .path(
            "restrictEnrollmentsToCourseDates",
            "restrict_enrollments_to_course_dates",
        )
}

/// Quizzes (exams)
pub fn exam_map() -> FieldMap {
    FieldMap::new()
        .path("apiExamId", "id")
        .path("title", "title")
        .path("description", "description")
        .path("examUrl", "html_url")
        .path("durationMinutes", "time_limit")
        .path("attemptsAllowed", "allowed_attempts")
        .path("password", "access_code")
        .path("examOpenDate", "unlock_at")
        .path("examCloseDate", "lock_at")
}

fn user_name(record: &JsonValue) -> Option<&str> {
    get_path(record, "user.name").and_then(JsonValue::as_str)
}

/// First word of `user.name`
fn first_name(record: &JsonValue) -> JsonValue {
    user_name(record)
        .map(|name| JsonValue::from(name.split(' ').next().unwrap_or_default()))
        .unwrap_or_default()
}

/// Everything after the first word of `user.name`
fn last_name(record: &JsonValue) -> JsonValue {
    user_name(record)
        .map(|name| JsonValue::from(name.split(' ').skip(1).collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}
