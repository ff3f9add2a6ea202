use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::config::Config;
use crate::db::JobStore;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
    pub config: Config,
}

// Note: FromRow is needed for runtime query_as (without DATABASE_URL at compile time)

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Account that published the posting, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /jobs`.
///
/// Every field deserializes as optional so that an incomplete body reaches
/// validation instead of failing in the JSON extractor.
#[derive(Debug, Clone, Default, serde::Deserialize, Validate)]
#[serde(default)]
pub struct NewJob {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub creator: Option<Uuid>,
}

impl NewJob {
    /// Check required fields and build the record to persist.
    pub fn into_job(self) -> Result<Job, ValidationErrors> {
        self.validate()?;

        Ok(Job {
            id: Uuid::new_v4(),
            title: self.title.unwrap_or_default(),
            location: self.location,
            description: self.description,
            category: self.category,
            company: self.company,
            email: self.email,
            url: self.url,
            creator: self.creator,
            created_at: Utc::now(),
        })
    }
}

/// Parse a path segment into a job identifier.
///
/// Anything that is not a UUID cannot name a stored job, so callers treat
/// `None` the same as a missing document.
pub fn parse_job_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

// API Request/Response types

/// Query string of `GET /jobs`. Empty values (`?offset=&limit=`) count as absent.
#[derive(Debug, Default, serde::Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl Pagination {
    pub fn is_negative(&self) -> bool {
        self.offset.is_some_and(|o| o < 0) || self.limit.is_some_and(|l| l < 0)
    }

    pub fn skip(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    /// A missing or zero limit means "no limit".
    pub fn take(&self) -> Option<i64> {
        self.limit.filter(|l| *l > 0)
    }
}

#[derive(Debug, serde::Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, serde::Serialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> NewJob {
        NewJob {
            title: Some("Back-end developer".to_string()),
            location: Some("Hammersmith".to_string()),
            description: Some("Payments team".to_string()),
            category: Some("engineering".to_string()),
            company: Some("Yoox".to_string()),
            email: Some("hello@yoox.com".to_string()),
            url: Some("https://www.yoox.com".to_string()),
            creator: None,
        }
    }

    #[test]
    fn test_into_job_copies_fields() {
        let job = full_input().into_job().unwrap();

        assert_eq!(job.title, "Back-end developer");
        assert_eq!(job.company.as_deref(), Some("Yoox"));
        assert_eq!(job.url.as_deref(), Some("https://www.yoox.com"));
        assert!(job.creator.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = full_input().into_job().unwrap();
        let b = full_input().into_job().unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let errors = NewJob::default().into_job().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let blank = NewJob {
            title: Some(String::new()),
            ..full_input()
        };
        assert!(blank.into_job().is_err());
    }

    #[test]
    fn test_empty_body_deserializes() {
        let input: NewJob = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_creator_is_read_but_underscore_field_ignored() {
        let creator = Uuid::new_v4();
        let input: NewJob = serde_json::from_value(serde_json::json!({
            "title": "Account Manager",
            "creator": creator,
            "_creator": "5a1b2c3d4e5f6a7b8c9d0e1f",
        }))
        .unwrap();

        assert_eq!(input.creator, Some(creator));
    }

    #[test]
    fn test_pagination_treats_empty_values_as_absent() {
        let page: Pagination = serde_json::from_value(serde_json::json!({
            "offset": "",
            "limit": " ",
        }))
        .unwrap();
        assert_eq!(page.offset, None);
        assert_eq!(page.take(), None);

        let page: Pagination = serde_json::from_value(serde_json::json!({
            "offset": "1",
            "limit": "2",
        }))
        .unwrap();
        assert_eq!(page.skip(), 1);
        assert_eq!(page.take(), Some(2));

        assert!(serde_json::from_value::<Pagination>(serde_json::json!({ "offset": "abc" })).is_err());
    }

    #[test]
    fn test_parse_job_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_job_id(&id.to_string()), Some(id));
        assert_eq!(parse_job_id("123"), None);
        assert_eq!(parse_job_id("not-a-uuid"), None);
    }

    #[test]
    fn test_pagination_rules() {
        let default = Pagination::default();
        assert!(!default.is_negative());
        assert_eq!(default.skip(), 0);
        assert_eq!(default.take(), None);

        let page = Pagination { offset: Some(1), limit: Some(2) };
        assert_eq!(page.skip(), 1);
        assert_eq!(page.take(), Some(2));

        let zero = Pagination { offset: None, limit: Some(0) };
        assert_eq!(zero.take(), None);

        assert!(Pagination { offset: Some(-1), limit: None }.is_negative());
        assert!(Pagination { offset: None, limit: Some(-5) }.is_negative());
    }
}
