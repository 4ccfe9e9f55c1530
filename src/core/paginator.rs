use crate::core::projector::Projector;
use crate::domain::model::{ExportBatch, Session};
use crate::domain::ports::UserDirectory;
use crate::utils::error::{ExportError, Result};

/// Walks the user listing page by page until the server-reported total is reached.
pub struct Paginator<'a, D: UserDirectory + ?Sized> {
    directory: &'a D,
    projector: &'a Projector,
    page_size: usize,
}

impl<'a, D: UserDirectory + ?Sized> Paginator<'a, D> {
    pub fn new(directory: &'a D, projector: &'a Projector, page_size: usize) -> Self {
        Self {
            directory,
            projector,
            page_size: page_size.max(1),
        }
    }

    /// Fetches and projects every user. Any failed page aborts the whole run.
    pub async fn fetch_all(&self, session: &Session) -> Result<ExportBatch> {
        let mut batch = ExportBatch::new();
        let mut offset = 0;

        loop {
            let page = self
                .directory
                .list_users(session, offset, self.page_size)
                .await?;
            let total = page.total;
            let received = page.users.len();

            batch.extend(page.users.iter().map(|user| self.projector.project(user)));
            offset = batch.len();

            tracing::info!(
                "Added {} users from this request ({} so far)...",
                received,
                offset
            );

            if offset == total {
                break;
            }
            if offset > total {
                tracing::warn!(
                    "⚠️ Received {} users but the server reports a total of {}; stopping",
                    offset,
                    total
                );
                break;
            }
            if received == 0 {
                return Err(ExportError::IncompleteListing { offset, total });
            }
        }

        tracing::info!("Success! Found {} in total.", batch.len());
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RawUserRecord, UsersPage};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves `total` synthetic users; `fail_at` makes the n-th request (1-based) fail.
    struct InMemoryDirectory {
        users: Vec<RawUserRecord>,
        reported_total: Box<dyn Fn(usize) -> usize + Send + Sync>,
        fail_at: Option<usize>,
        requests: Mutex<Vec<(usize, usize)>>,
    }

    impl InMemoryDirectory {
        fn new(total: usize) -> Self {
            let users = (0..total)
                .map(|i| {
                    serde_json::from_value(json!({
                        "_id": format!("u{}", i),
                        "username": format!("user{}", i),
                        "emails": [{"address": format!("user{}@example.com", i), "verified": i % 2 == 0}]
                    }))
                    .unwrap()
                })
                .collect();
            Self {
                users,
                reported_total: Box::new(move |_| total),
                fail_at: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(usize, usize)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserDirectory for InMemoryDirectory {
        async fn authenticate(&self, _identifier: &str, _secret: &str) -> Result<Session> {
            Ok(session())
        }

        async fn list_users(&self, _session: &Session, offset: usize, count: usize) -> Result<UsersPage> {
            let mut requests = self.requests.lock().unwrap();
            requests.push((offset, count));
            if self.fail_at == Some(requests.len()) {
                return Err(ExportError::ApiStatusError {
                    endpoint: "/api/v1/users.list".to_string(),
                    status: 502,
                });
            }

            let users: Vec<RawUserRecord> =
                self.users.iter().skip(offset).take(count).cloned().collect();
            Ok(UsersPage {
                count: Some(users.len()),
                offset: Some(offset),
                total: (self.reported_total)(requests.len()),
                users,
            })
        }
    }

    fn session() -> Session {
        Session {
            user_id: "admin-id".to_string(),
            auth_token: "token".to_string(),
        }
    }

    fn projector() -> Projector {
        Projector::new(vec!["_id".to_string(), "username".to_string()], true)
    }

    #[tokio::test]
    async fn test_two_pages_for_150_users() {
        let directory = InMemoryDirectory::new(150);
        let projector = projector();
        let paginator = Paginator::new(&directory, &projector, 100);

        let batch = paginator.fetch_all(&session()).await.unwrap();

        assert_eq!(directory.requests(), vec![(0, 100), (100, 100)]);
        assert_eq!(batch.len(), 150);
        assert_eq!(batch.records()[0].get("_id"), Some(&json!("u0")));
        assert_eq!(batch.records()[149].get("_id"), Some(&json!("u149")));
        assert_eq!(
            batch.records()[1].get("mailAddress1"),
            Some(&json!("user1@example.com"))
        );
    }

    #[tokio::test]
    async fn test_request_count_is_ceiling_of_total_over_page_size() {
        for (total, page_size) in [(1, 100), (100, 100), (101, 100), (250, 25), (7, 3)] {
            let directory = InMemoryDirectory::new(total);
            let projector = projector();
            let paginator = Paginator::new(&directory, &projector, page_size);

            let batch = paginator.fetch_all(&session()).await.unwrap();

            let expected_requests = total.div_ceil(page_size);
            assert_eq!(directory.requests().len(), expected_requests, "total={total}");
            assert_eq!(batch.len(), total);

            let ids: Vec<String> = batch
                .iter()
                .map(|r| r.get("_id").unwrap().as_str().unwrap().to_string())
                .collect();
            let expected: Vec<String> = (0..total).map(|i| format!("u{}", i)).collect();
            assert_eq!(ids, expected);
        }
    }

    #[tokio::test]
    async fn test_empty_directory_needs_one_request() {
        let directory = InMemoryDirectory::new(0);
        let projector = projector();
        let paginator = Paginator::new(&directory, &projector, 100);

        let batch = paginator.fetch_all(&session()).await.unwrap();

        assert!(batch.is_empty());
        assert_eq!(directory.requests(), vec![(0, 100)]);
    }

    #[tokio::test]
    async fn test_failed_page_aborts() {
        let mut directory = InMemoryDirectory::new(250);
        directory.fail_at = Some(2);
        let projector = projector();
        let paginator = Paginator::new(&directory, &projector, 100);

        let err = paginator.fetch_all(&session()).await.unwrap_err();

        assert!(matches!(err, ExportError::ApiStatusError { status: 502, .. }));
        assert_eq!(directory.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_total_shrinking_below_offset_stops_with_accumulated_users() {
        let mut directory = InMemoryDirectory::new(150);
        // second page reports fewer users than already fetched
        directory.reported_total = Box::new(|request: usize| if request == 1 { 150 } else { 120 });
        let projector = projector();
        let paginator = Paginator::new(&directory, &projector, 100);

        let batch = paginator.fetch_all(&session()).await.unwrap();

        assert_eq!(batch.len(), 150);
        assert_eq!(directory.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_before_total_is_an_error() {
        let mut directory = InMemoryDirectory::new(100);
        directory.reported_total = Box::new(|_: usize| 130);
        let projector = projector();
        let paginator = Paginator::new(&directory, &projector, 100);

        let err = paginator.fetch_all(&session()).await.unwrap_err();

        assert!(matches!(
            err,
            ExportError::IncompleteListing {
                offset: 100,
                total: 130
            }
        ));
        assert_eq!(directory.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_total_growing_mid_run_is_followed() {
        let mut directory = InMemoryDirectory::new(160);
        directory.reported_total = Box::new(|request: usize| if request == 1 { 120 } else { 160 });
        let projector = projector();
        let paginator = Paginator::new(&directory, &projector, 100);

        let batch = paginator.fetch_all(&session()).await.unwrap();

        assert_eq!(batch.len(), 160);
        assert_eq!(directory.requests(), vec![(0, 100), (100, 100)]);
    }
}
