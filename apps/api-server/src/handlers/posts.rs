//! Post resource handlers - bearer-authenticated CRUD.

use actix_web::{HttpResponse, web};

use prensa_core::domain::{NewPost, Post};
use prensa_core::error::RepoError;
use prensa_core::ports::PostRepository;
use prensa_shared::ListEnvelope;
use prensa_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn post_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Post with id {} not found", id))
}

/// POST /api/posts
pub async fn create(
    _identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let draft = NewPost::new(body.into_inner().title)?;

    let post = state.posts.insert(draft).await?;
    tracing::info!(post_id = post.id, "Post created");

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts
pub async fn list(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;

    let data = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ListEnvelope::new(data)))
}

/// GET /api/posts/{id}
pub async fn show(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}
pub async fn update(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    // Validation precedes the id lookup: an empty title is 422 even when
    // the id is also absent.
    let draft = NewPost::new(body.into_inner().title)?;

    let post = state.posts.update(id, draft).await.map_err(|e| match e {
        RepoError::NotFound => post_not_found(id),
        other => other.into(),
    })?;
    tracing::info!(post_id = id, "Post updated");

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}
///
/// Deleting an id that was never created (or was already deleted) is 404,
/// matching the show/update policy.
pub async fn destroy(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => post_not_found(id),
        other => other.into(),
    })?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::json;

    use prensa_core::domain::NewPost;
    use prensa_core::ports::{PostRepository, TokenService};
    use prensa_infra::{InMemoryPostRepository, JwtConfig, JwtTokenService};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    struct TestCtx {
        state: web::Data<AppState>,
        tokens: web::Data<Arc<dyn TokenService>>,
        auth: (&'static str, String),
    }

    fn test_ctx() -> TestCtx {
        let state = web::Data::new(AppState {
            posts: Arc::new(InMemoryPostRepository::new()),
        });

        let service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }));
        let token = service.generate_token(uuid::Uuid::new_v4()).unwrap();

        TestCtx {
            state,
            tokens: web::Data::new(service),
            auth: ("Authorization", format!("Bearer {}", token)),
        }
    }

    // init_service's return type is not nameable from actix-web, so app
    // construction lives in a macro instead of a helper fn.
    macro_rules! init_app {
        ($ctx:expr) => {
            test::init_service(
                App::new()
                    .app_data($ctx.state.clone())
                    .app_data($ctx.tokens.clone())
                    .configure(configure_routes),
            )
            .await
        };
    }

    async fn seed_post(ctx: &TestCtx, title: &str) -> prensa_core::domain::Post {
        ctx.state
            .posts
            .insert(NewPost::new(title).unwrap())
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn create_persists_post_and_returns_created() {
        let ctx = test_ctx();
        let app = init_app!(&ctx);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(ctx.auth.clone())
            .set_json(json!({"title": "El post de prueba"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "El post de prueba");
        for key in ["id", "title", "created_at", "updated_at"] {
            assert!(body.get(key).is_some(), "missing key {}", key);
        }

        // Side effect: the row is durably in the store
        let stored = ctx.state.posts.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "El post de prueba");
    }

    #[actix_web::test]
    async fn create_with_empty_title_is_unprocessable() {
        let ctx = test_ctx();
        let app = init_app!(&ctx);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(ctx.auth.clone())
            .set_json(json!({"title": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["errors"]["title"][0].is_string());

        // No row persisted
        assert!(ctx.state.posts.find_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn show_returns_post() {
        let ctx = test_ctx();
        let seeded = seed_post(&ctx, "El post de prueba").await;
        let app = init_app!(&ctx);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", seeded.id))
            .insert_header(ctx.auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], seeded.id);
        assert_eq!(body["title"], "El post de prueba");
    }

    #[actix_web::test]
    async fn show_unknown_id_is_not_found() {
        let ctx = test_ctx();
        let app = init_app!(&ctx);

        let req = test::TestRequest::get()
            .uri("/api/posts/1000")
            .insert_header(ctx.auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_retitles_post() {
        let ctx = test_ctx();
        let seeded = seed_post(&ctx, "El post de prueba").await;
        let app = init_app!(&ctx);

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", seeded.id))
            .insert_header(ctx.auth.clone())
            .set_json(json!({"title": "Nuevo"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Nuevo");

        let stored = ctx.state.posts.find_by_id(seeded.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Nuevo");
        assert!(stored.updated_at >= seeded.updated_at);
    }

    #[actix_web::test]
    async fn update_unknown_id_is_not_found() {
        let ctx = test_ctx();
        let app = init_app!(&ctx);

        let req = test::TestRequest::put()
            .uri("/api/posts/1000")
            .insert_header(ctx.auth.clone())
            .set_json(json!({"title": "Nuevo"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_with_empty_title_is_unprocessable() {
        let ctx = test_ctx();
        let seeded = seed_post(&ctx, "El post de prueba").await;
        let app = init_app!(&ctx);

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", seeded.id))
            .insert_header(ctx.auth.clone())
            .set_json(json!({"title": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        // The row is untouched
        let stored = ctx.state.posts.find_by_id(seeded.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "El post de prueba");
    }

    #[actix_web::test]
    async fn delete_removes_post() {
        let ctx = test_ctx();
        let seeded = seed_post(&ctx, "El post de prueba").await;
        let app = init_app!(&ctx);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", seeded.id))
            .insert_header(ctx.auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());

        assert!(ctx.state.posts.find_by_id(seeded.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn delete_unknown_id_is_not_found() {
        let ctx = test_ctx();
        let app = init_app!(&ctx);

        let req = test::TestRequest::delete()
            .uri("/api/posts/1000")
            .insert_header(ctx.auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_wraps_posts_in_data_envelope() {
        let ctx = test_ctx();
        seed_post(&ctx, "uno").await;
        seed_post(&ctx, "dos").await;
        let app = init_app!(&ctx);

        let req = test::TestRequest::get()
            .uri("/api/posts")
            .insert_header(ctx.auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["title"], "uno");
        assert_eq!(data[1]["title"], "dos");
        for key in ["id", "title", "created_at", "updated_at"] {
            assert!(data[0].get(key).is_some(), "missing key {}", key);
        }
    }

    #[actix_web::test]
    async fn requests_without_token_are_unauthorized() {
        let ctx = test_ctx();
        let seeded = seed_post(&ctx, "El post de prueba").await;
        let app = init_app!(&ctx);

        let requests = vec![
            test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({"title": "Nuevo"}))
                .to_request(),
            test::TestRequest::get().uri("/api/posts").to_request(),
            test::TestRequest::get()
                .uri(&format!("/api/posts/{}", seeded.id))
                .to_request(),
            test::TestRequest::put()
                .uri(&format!("/api/posts/{}", seeded.id))
                .set_json(json!({"title": "Nuevo"}))
                .to_request(),
            test::TestRequest::delete()
                .uri(&format!("/api/posts/{}", seeded.id))
                .to_request(),
        ];

        for req in requests {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }

        // No side effects: the seeded post survives, nothing was created
        let stored = ctx.state.posts.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "El post de prueba");
    }

    #[actix_web::test]
    async fn invalid_token_is_unauthorized() {
        let ctx = test_ctx();
        let app = init_app!(&ctx);

        let req = test::TestRequest::get()
            .uri("/api/posts")
            .insert_header(("Authorization", "Bearer not-a-real-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
