use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::health_check;
use crate::models::{Job, NewJob};
use crate::types::StoreError;

/// Data-access handle for the job collection.
///
/// Listing always follows insertion order.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Skip `skip` jobs and return at most `limit` of the rest (`None` = all).
    async fn find(&self, skip: i64, limit: Option<i64>) -> Result<Vec<Job>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, StoreError>;

    async fn insert(&self, job: Job) -> Result<Job, StoreError>;

    /// Delete a job, returning what was removed.
    async fn remove(&self, id: Uuid) -> Result<Option<Job>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Validate a create request and persist it.
pub async fn create_job(store: &dyn JobStore, new_job: NewJob) -> Result<Job, StoreError> {
    let job = new_job.into_job()?;
    store.insert(job).await
}

const JOB_COLUMNS: &str =
    "id, title, location, description, category, company, email, url, creator, created_at";

/// `JobStore` backed by the `jobs` table in Postgres.
#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn find(&self, skip: i64, limit: Option<i64>) -> Result<Vec<Job>, StoreError> {
        // LIMIT NULL is the same as no limit
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY seq ASC OFFSET $1 LIMIT $2"
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn insert(&self, job: Job) -> Result<Job, StoreError> {
        let row = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (id, title, location, description, category, company, email, url, creator, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.location)
        .bind(&job.description)
        .bind(&job.category)
        .bind(&job.company)
        .bind(&job.email)
        .bind(&job.url)
        .bind(job.creator)
        .bind(job.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(job_id = %row.id, "Job inserted");
        Ok(row)
    }

    async fn remove(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "DELETE FROM jobs WHERE id = $1 RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        health_check(&self.pool).await?;
        Ok(())
    }
}

// These need a reachable Postgres: DATABASE_URL=... cargo test -- --ignored
#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> NewJob {
        NewJob {
            title: Some(title.to_string()),
            ..NewJob::default()
        }
    }

    async fn seeded(store: &PgJobStore) -> Vec<Job> {
        let mut jobs = Vec::new();
        for title in ["Front-end developer", "Account Manager", "Product Manager"] {
            jobs.push(create_job(store, titled(title)).await.unwrap());
        }
        jobs
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_find_pages_in_insertion_order(pool: PgPool) {
        let store = PgJobStore::new(pool);
        let jobs = seeded(&store).await;

        let all = store.find(0, None).await.unwrap();
        let ids: Vec<Uuid> = all.iter().map(|j| j.id).collect();
        let expected: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, expected);

        let page = store.find(1, Some(2)).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title, "Account Manager");
        assert_eq!(page[1].title, "Product Manager");

        assert!(store.find(5, None).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_insert_round_trips_fields(pool: PgPool) {
        let store = PgJobStore::new(pool);
        let creator = Uuid::new_v4();
        let input = NewJob {
            company: Some("Yoox".to_string()),
            creator: Some(creator),
            ..titled("Back-end developer")
        };

        let created = create_job(&store, input).await.unwrap();
        let fetched = store.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.title, "Back-end developer");
        assert_eq!(fetched.company.as_deref(), Some("Yoox"));
        assert_eq!(fetched.creator, Some(creator));
        assert!(fetched.location.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_remove_returns_row_once(pool: PgPool) {
        let store = PgJobStore::new(pool);
        let jobs = seeded(&store).await;
        let id = jobs[0].id;

        let removed = store.remove(id).await.unwrap();
        assert_eq!(removed.map(|j| j.title), Some("Front-end developer".to_string()));
        assert!(store.remove(id).await.unwrap().is_none());
        assert!(store.find_by_id(id).await.unwrap().is_none());
        assert_eq!(store.find(0, None).await.unwrap().len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_ping(pool: PgPool) {
        let store = PgJobStore::new(pool);
        assert!(store.ping().await.is_ok());
    }
}
