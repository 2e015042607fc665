#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::dev::Service;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use blog_api::application::auth_service::AuthService;
use blog_api::application::comment_service::CommentService;
use blog_api::application::follow_service::FollowService;
use blog_api::application::group_service::GroupService;
use blog_api::application::post_service::PostService;
use blog_api::data::comment_repository::{CommentRepository, NewComment};
use blog_api::data::follow_repository::{ALREADY_FOLLOWING, FollowRepository};
use blog_api::data::group_repository::GroupRepository;
use blog_api::data::post_repository::{NewPost, PostRepository};
use blog_api::data::user_repository::UserRepository;
use blog_api::domain::comment::Comment;
use blog_api::domain::error::DomainError;
use blog_api::domain::follow::Follow;
use blog_api::domain::group::Group;
use blog_api::domain::post::Post;
use blog_api::domain::user::User;
use blog_api::infrastructure::security::{JwtKeys, hash_password};

pub const PASSWORD: &str = "correct horse battery staple";

#[derive(Default)]
struct State {
    users: Vec<User>,
    groups: Vec<Group>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    follows: Vec<Follow>,
    next_id: i64,
}

/// In-memory stand-in for the PostgreSQL repositories, mirroring their
/// observable behaviour: ascending ids, username joins, cascade on post
/// delete, and the unique (user, following) pair.
pub struct MemStore {
    state: Mutex<State>,
}

impl MemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
        })
    }

    fn next_id(state: &mut State) -> i64 {
        state.next_id += 1;
        state.next_id
    }

    fn username_of(state: &State, id: Uuid) -> Result<String, DomainError> {
        state
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.clone())
            .ok_or_else(|| DomainError::Internal("unknown user".into()))
    }

    pub fn seed_user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{}@example.com", username),
            hash_password(PASSWORD).unwrap(),
        );
        self.state.lock().unwrap().users.push(user.clone());
        user
    }

    pub fn seed_group(&self, title: &str, slug: &str) -> Group {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        let group = Group {
            id,
            title: title.to_string(),
            slug: slug.to_string(),
            description: format!("All about {}", title),
        };
        state.groups.push(group.clone());
        group
    }

    pub fn seed_post(&self, author: &User, text: &str, group_id: Option<i64>) -> Post {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        let post = Post {
            id,
            author_id: author.id,
            author_username: author.username.clone(),
            text: text.to_string(),
            pub_date: Utc::now(),
            image: None,
            group_id,
        };
        state.posts.push(post.clone());
        post
    }

    pub fn seed_comment(&self, author: &User, post: &Post, text: &str) -> Comment {
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        let comment = Comment {
            id,
            author_id: author.id,
            author_username: author.username.clone(),
            post_id: post.id,
            text: text.to_string(),
            created: Utc::now(),
        };
        state.comments.push(comment.clone());
        comment
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.state.lock().unwrap().comments.len()
    }

    pub fn follow_count(&self) -> usize {
        self.state.lock().unwrap().follows.len()
    }
}

#[async_trait]
impl UserRepository for MemStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl GroupRepository for MemStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.groups.iter().find(|g| g.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.groups.clone())
    }
}

#[async_trait]
impl PostRepository for MemStore {
    async fn create(&self, new: NewPost) -> Result<Post, DomainError> {
        let mut state = self.state.lock().unwrap();
        let author_username = Self::username_of(&state, new.author_id)?;
        let id = Self::next_id(&mut state);
        let post = Post {
            id,
            author_id: new.author_id,
            author_username,
            text: new.text,
            pub_date: Utc::now(),
            image: new.image,
            group_id: new.group_id,
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.posts.iter_mut().find(|p| p.id == post.id) {
            stored.text = post.text.clone();
            stored.image = post.image.clone();
            stored.group_id = post.group_id;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.posts.retain(|p| p.id != id);
        // comments cascade with their post
        state.comments.retain(|c| c.post_id != id);
        Ok(())
    }

    async fn list(&self, page: Option<(i64, i64)>) -> Result<Vec<Post>, DomainError> {
        let state = self.state.lock().unwrap();
        let posts = state.posts.iter().cloned();
        Ok(match page {
            Some((limit, offset)) => posts
                .skip(offset.max(0) as usize)
                .take(limit.max(0) as usize)
                .collect(),
            None => posts.collect(),
        })
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.len() as i64)
    }
}

#[async_trait]
impl CommentRepository for MemStore {
    async fn create(&self, new: NewComment) -> Result<Comment, DomainError> {
        let mut state = self.state.lock().unwrap();
        let author_username = Self::username_of(&state, new.author_id)?;
        let id = Self::next_id(&mut state);
        let comment = Comment {
            id,
            author_id: new.author_id,
            author_username,
            post_id: new.post_id,
            text: new.text,
            created: Utc::now(),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, comment: &Comment) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.comments.iter_mut().find(|c| c.id == comment.id) {
            stored.text = comment.text.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        state.comments.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FollowRepository for MemStore {
    async fn create(&self, user_id: Uuid, following_id: Uuid) -> Result<Follow, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state
            .follows
            .iter()
            .any(|f| f.user_id == user_id && f.following_id == following_id)
        {
            return Err(DomainError::validation("non_field_errors", ALREADY_FOLLOWING));
        }
        let user_username = Self::username_of(&state, user_id)?;
        let following_username = Self::username_of(&state, following_id)?;
        let id = Self::next_id(&mut state);
        let follow = Follow {
            id,
            user_id,
            user_username,
            following_id,
            following_username,
        };
        state.follows.push(follow.clone());
        Ok(follow)
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<Vec<Follow>, DomainError> {
        let state = self.state.lock().unwrap();
        let needle = search.map(|s| s.to_lowercase());
        Ok(state
            .follows
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter(|f| match &needle {
                Some(needle) => f.following_username.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect())
    }
}

pub struct TestContext {
    pub store: Arc<MemStore>,
    pub keys: JwtKeys,
    pub auth: AuthService,
    pub posts: PostService,
    pub comments: CommentService,
    pub groups: GroupService,
    pub follows: FollowService,
}

impl TestContext {
    pub fn new() -> Self {
        let store = MemStore::new();
        let keys = JwtKeys::new("test-secret".into(), 3600, 86400);

        let users: Arc<dyn UserRepository> = store.clone();
        let groups: Arc<dyn GroupRepository> = store.clone();
        let posts: Arc<dyn PostRepository> = store.clone();
        let comments: Arc<dyn CommentRepository> = store.clone();
        let follows: Arc<dyn FollowRepository> = store.clone();

        Self {
            auth: AuthService::new(Arc::clone(&users), keys.clone()),
            posts: PostService::new(Arc::clone(&posts), Arc::clone(&groups)),
            comments: CommentService::new(comments, posts),
            groups: GroupService::new(groups),
            follows: FollowService::new(follows, users),
            keys,
            store,
        }
    }

    pub fn access_token(&self, user: &User) -> String {
        self.keys.generate_pair(user.id).unwrap().access
    }

    pub fn bearer(&self, user: &User) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.access_token(user)))
    }
}

/// Like `test::call_service`, but tolerant of middleware that short-circuits
/// with an error: the error is rendered the way the HTTP dispatcher would.
pub async fn call_status<S, B>(app: &S, req: actix_http::Request) -> actix_web::http::StatusCode
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    match app.call(req).await {
        Ok(resp) => resp.status(),
        Err(err) => actix_web::HttpResponse::from_error(err).status(),
    }
}

/// Builds the real route table on top of the in-memory repositories.
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {{
        let ctx = &$ctx;
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(blog_api::presentation::middleware::RequestTrace)
                .app_data(blog_api::presentation::routes::json_config())
                .app_data(actix_web::web::Data::new(ctx.auth.clone()))
                .app_data(actix_web::web::Data::new(ctx.posts.clone()))
                .app_data(actix_web::web::Data::new(ctx.comments.clone()))
                .app_data(actix_web::web::Data::new(ctx.groups.clone()))
                .app_data(actix_web::web::Data::new(ctx.follows.clone()))
                .service(blog_api::presentation::routes::api_scope()),
        )
        .await
    }};
}
