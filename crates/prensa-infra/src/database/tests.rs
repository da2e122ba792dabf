#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use prensa_core::domain::Post;
    use prensa_core::error::RepoError;
    use prensa_core::ports::PostRepository;

    fn model(id: i64, title: &str) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            title: title.to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(7, "El post de prueba")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        assert!(result.is_some());
        let post = result.unwrap();
        assert_eq!(post.title, "El post de prueba");
        assert_eq!(post.id, 7);
    }

    #[tokio::test]
    async fn test_find_post_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_by_id(1000).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_all_posts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(1, "uno"), model(2, "dos")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts = repo.find_all().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].title, "dos");
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let err = repo.delete(1000).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}
