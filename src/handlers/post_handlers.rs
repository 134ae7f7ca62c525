use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::dtos::post_dtos::{CreatePostDTO, ListPostsQuery, UpdatePostDTO};
use crate::dtos::ApiResponse;
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::post_service::PostService;

#[get("/posts")]
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse, ApiError> {
    let posts = service
        .list_posts(query.orden.as_deref(), query.busqueda.as_deref())
        .await?;
    log::info!("listed {} posts (orden={:?})", posts.len(), query.orden);
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Posts retrieved successfully", posts)))
}

#[get("/posts/{id}")]
pub async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let post = service.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Post retrieved successfully", post)))
}

#[post("/posts")]
pub async fn create_post(
    service: web::Data<PostService>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let post = service.create_post(user.user_id, body.into_inner()).await?;
    log::info!("user {} created post {}", user.user_id, post.id);
    Ok(HttpResponse::Created().json(ApiResponse::ok("Post created successfully", post)))
}

#[put("/posts/{id}")]
pub async fn update_post(
    service: web::Data<PostService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let post = service
        .update_post(path.into_inner(), user.user_id, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Post updated successfully", post)))
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    service: web::Data<PostService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    service.delete_post(id, user.user_id, &user.role).await?;
    log::info!("user {} deleted post {}", user.user_id, id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::ok("Post deleted successfully", ())))
}

#[post("/posts/{id}/like")]
pub async fn like_post(
    service: web::Data<PostService>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    service.like_post(path.into_inner(), user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::ok("Post liked", ())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use serde_json::Value;
    use std::sync::Arc;

    use crate::models::like::Like;
    use crate::models::post::Post;
    use crate::models::user::User;
    use crate::repositories::post_repository::{NewPost, PostPatch, PostRepository};
    use crate::repositories::user_repository::{NewUser, UserRepository};

    struct FakePostRepo {
        posts: Vec<Post>,
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn read_all(&self) -> Result<Vec<Post>, ApiError> {
            Ok(self.posts.clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
            Ok(self.posts.iter().find(|p| p.id == id).cloned())
        }

        async fn create(&self, input: NewPost) -> Result<Post, ApiError> {
            Ok(make_post(&input.title, 0))
        }

        async fn update(&self, _id: Uuid, _patch: PostPatch) -> Result<(), ApiError> {
            Ok(())
        }

        async fn soft_delete(&self, _id: Uuid) -> Result<(), ApiError> {
            Ok(())
        }

        async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<Like, ApiError> {
            Ok(Like {
                id: Uuid::new_v4(),
                user_id,
                post_id,
                created_at: Utc::now(),
            })
        }
    }

    struct FakeUserRepo;

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn read_all(&self) -> Result<Vec<User>, ApiError> {
            Ok(vec![])
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, ApiError> {
            Ok(None)
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, ApiError> {
            Ok(None)
        }

        async fn create(&self, input: NewUser) -> Result<User, ApiError> {
            Ok(User {
                id: Uuid::new_v4(),
                full_name: input.full_name,
                email: input.email,
                password_hash: input.password_hash,
                role: input.role,
                banned: false,
            })
        }

        async fn set_banned(&self, _id: Uuid, _banned: bool) -> Result<bool, ApiError> {
            Ok(true)
        }
    }

    fn make_post(title: &str, age_days: i64) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: None,
            deleted: false,
            author_id: Uuid::new_v4(),
            created_at: Utc::now() - Duration::days(age_days),
            author_name: "author".to_string(),
            likes: None,
        }
    }

    fn post_service(posts: Vec<Post>) -> web::Data<PostService> {
        web::Data::new(PostService::new(
            Arc::new(FakePostRepo { posts }),
            Arc::new(FakeUserRepo),
        ))
    }

    #[actix_web::test]
    async fn list_posts_wraps_results_in_envelope() {
        let app = test::init_service(
            App::new()
                .app_data(post_service(vec![
                    make_post("viejo", 10),
                    make_post("nuevo", 0),
                ]))
                .service(list_posts),
        )
        .await;

        let req = test::TestRequest::get().uri("/posts").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "success");
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        // default order: newest first
        assert_eq!(data[0]["title"], "nuevo");
        assert_eq!(data[1]["title"], "viejo");
    }

    #[actix_web::test]
    async fn list_posts_applies_search_from_query_string() {
        let app = test::init_service(
            App::new()
                .app_data(post_service(vec![
                    make_post("rust al grano", 0),
                    make_post("otros temas", 1),
                ]))
                .service(list_posts),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/posts?busqueda=rust")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: Value = test::read_body_json(resp).await;
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["title"], "rust al grano");
    }
}
