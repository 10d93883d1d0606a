//! Integration tests for repository layer
//!
//! Each scenario is written against the repository traits and runs on the
//! in-memory adapters. The PostgreSQL variants are `#[ignore]`d and need
//! `DATABASE_URL`:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test --test repository_integration -- --ignored
//! ```

use chrono::{Duration, Utc};
use jobportal_api::domain::application::{Application, ApplicationStatus};
use jobportal_api::domain::comment::Comment;
use jobportal_api::domain::company::Company;
use jobportal_api::domain::job::{Job, JobFilter, JobType, NewJob};
use jobportal_api::domain::post::Post;
use jobportal_api::domain::repositories::{
    ApplicationRepository, CommentRepository, CompanyRepository, JobRepository, PostRepository,
    RepositoryError, UserRepository,
};
use jobportal_api::domain::user::{Email, ProfileUpdate, Role, User};
use jobportal_api::infrastructure::repositories::{
    InMemoryApplicationRepository, InMemoryCommentRepository, InMemoryCompanyRepository,
    InMemoryJobRepository, InMemoryPostRepository, InMemoryUserRepository,
    PostgresApplicationRepository, PostgresCommentRepository, PostgresCompanyRepository,
    PostgresJobRepository, PostgresPostRepository, PostgresUserRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Set up test database connection pool with the schema applied
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Emails are unique per run so the scenarios can share a database
fn test_user(role: Role) -> User {
    let email = Email::new(format!("repo-{}@test.com", Uuid::new_v4())).unwrap();
    User::register(
        "Repo Test User".to_string(),
        email,
        "$2b$04$placeholderhash".to_string(),
        role,
        Some("Ferris Inc".to_string()),
        None,
    )
    .unwrap()
}

fn test_job(created_by: Uuid, title: &str, job_type: JobType) -> Job {
    Job::new(
        NewJob {
            title: title.to_string(),
            description: "Build reliable services".to_string(),
            salary: "100k".to_string(),
            location: "Berlin".to_string(),
            job_type,
            company_name: "Ferris Inc".to_string(),
            company: None,
        },
        created_by,
    )
    .unwrap()
}

// ===== Scenarios =====

async fn user_email_is_unique(users: &dyn UserRepository) {
    let user = test_user(Role::Candidate);
    users.create(&user).await.unwrap();

    let found = users.find_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert_eq!(found.role, Role::Candidate);

    let mut twin = test_user(Role::Employer);
    twin.email = user.email.clone();
    let err = users.create(&twin).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // Taking another account's email on update is a conflict as well
    let other = test_user(Role::Candidate);
    users.create(&other).await.unwrap();
    let taken = ProfileUpdate {
        email: Some(user.email.clone()),
        ..Default::default()
    };
    let err = users.update_profile(other.id, &taken).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // The old address stays with its owner after a successful change
    let fresh = Email::new(format!("moved-{}@test.com", Uuid::new_v4())).unwrap();
    let moved = ProfileUpdate {
        email: Some(fresh.clone()),
        ..Default::default()
    };
    users.update_profile(other.id, &moved).await.unwrap();
    assert_eq!(users.find_by_email(&fresh).await.unwrap().unwrap().id, other.id);
    assert!(users.find_by_email(&other.email).await.unwrap().is_none());
}

async fn user_update_persists_profile(users: &dyn UserRepository) {
    let user = test_user(Role::Employer);
    users.create(&user).await.unwrap();

    let changes = ProfileUpdate {
        bio: Some("Hiring".to_string()),
        skills: Some(vec!["rust".to_string(), "sql".to_string()]),
        company_website: Some("https://ferris.example".to_string()),
        ..Default::default()
    };
    let updated = users.update_profile(user.id, &changes).await.unwrap();
    assert_eq!(updated.bio, "Hiring");

    // A second edit of other fields keeps the first one
    let rename = ProfileUpdate {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    users.update_profile(user.id, &rename).await.unwrap();

    let found = users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Renamed");
    assert_eq!(found.bio, "Hiring");
    assert_eq!(found.skills, vec!["rust", "sql"]);
    assert_eq!(found.company_website, "https://ferris.example");
    assert_eq!(found.company_name, "Ferris Inc");
    assert_eq!(found.password_hash, user.password_hash);

    let err = users
        .update_profile(Uuid::new_v4(), &rename)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let batch = users.find_by_ids(&[user.id, Uuid::new_v4()]).await.unwrap();
    assert_eq!(batch.len(), 1);
}

async fn duplicate_application_is_conflict(
    users: &dyn UserRepository,
    jobs: &dyn JobRepository,
    applications: &dyn ApplicationRepository,
) {
    let employer = test_user(Role::Employer);
    let candidate = test_user(Role::Candidate);
    users.create(&employer).await.unwrap();
    users.create(&candidate).await.unwrap();

    let job = test_job(employer.id, "Rust Engineer", JobType::FullTime);
    jobs.create(&job).await.unwrap();

    let first = Application::new(job.id(), candidate.id, None, "https://cv".to_string()).unwrap();
    applications.create(&first).await.unwrap();

    let second = Application::new(job.id(), candidate.id, None, "https://cv2".to_string()).unwrap();
    match applications.create(&second).await {
        Err(RepositoryError::Conflict(message)) => {
            assert_eq!(message, Application::DUPLICATE_MESSAGE)
        }
        other => panic!("expected conflict, got {:?}", other.map(|_| ())),
    }

    let updated = applications
        .update_status(first.id, ApplicationStatus::Interview)
        .await
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Interview);

    let for_job = applications.find_by_job(job.id()).await.unwrap();
    assert_eq!(for_job.len(), 1);
    let mine = applications.find_by_applicant(candidate.id).await.unwrap();
    assert_eq!(mine[0].status, ApplicationStatus::Interview);
    let across = applications.find_by_jobs(&[job.id()]).await.unwrap();
    assert_eq!(across.len(), 1);

    let err = applications
        .update_status(Uuid::new_v4(), ApplicationStatus::Hired)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

async fn job_search_filters(users: &dyn UserRepository, jobs: &dyn JobRepository) {
    let employer = test_user(Role::Employer);
    users.create(&employer).await.unwrap();

    // Titles carry a per-run marker so a shared database does not leak matches
    let marker = Uuid::new_v4().simple().to_string();
    let rust = test_job(employer.id, &format!("Rust {}", marker), JobType::FullTime);
    let contract = test_job(employer.id, &format!("RUST contract {}", marker), JobType::Contract);
    jobs.create(&rust).await.unwrap();
    jobs.create(&contract).await.unwrap();

    let by_keyword = jobs
        .search(&JobFilter {
            keyword: Some(format!("rust {}", marker)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_keyword.len(), 1);
    assert_eq!(by_keyword[0].id(), rust.id());

    let by_type = jobs
        .search(&JobFilter {
            keyword: Some(marker.clone()),
            job_type: Some(JobType::Contract),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].id(), contract.id());

    let mine = jobs.find_by_creator(employer.id).await.unwrap();
    assert_eq!(mine.len(), 2);

    let total = jobs.count(None).await.unwrap();
    let recent = jobs.count(Some(Utc::now() - Duration::days(1))).await.unwrap();
    let future = jobs.count(Some(Utc::now() + Duration::days(1))).await.unwrap();
    assert!(recent >= 2);
    assert!(total >= recent);
    assert_eq!(future, 0);
}

async fn company_name_is_unique(users: &dyn UserRepository, companies: &dyn CompanyRepository) {
    let owner = test_user(Role::Employer);
    users.create(&owner).await.unwrap();

    let name = format!("Ferris {}", Uuid::new_v4());
    let company = Company::new(name.clone(), None, None, Some("Berlin".to_string()), None, owner.id).unwrap();
    companies.create(&company).await.unwrap();

    let twin = Company::new(name, None, None, None, None, owner.id).unwrap();
    let err = companies.create(&twin).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let found = companies.find_by_id(company.id).await.unwrap().unwrap();
    assert_eq!(found.location, "Berlin");
    assert!(companies
        .find_all()
        .await
        .unwrap()
        .iter()
        .any(|c| c.id == company.id));
}

async fn likes_toggle_and_comments_follow_post(
    users: &dyn UserRepository,
    posts: &dyn PostRepository,
    comments: &dyn CommentRepository,
) {
    let author = test_user(Role::Candidate);
    let fan = test_user(Role::Candidate);
    users.create(&author).await.unwrap();
    users.create(&fan).await.unwrap();

    let post = Post::new("Hello".to_string(), None, author.id).unwrap();
    posts.create(&post).await.unwrap();

    assert_eq!(posts.toggle_like(post.id, fan.id).await.unwrap(), vec![fan.id]);
    assert_eq!(
        posts.toggle_like(post.id, author.id).await.unwrap(),
        vec![fan.id, author.id]
    );
    assert_eq!(posts.toggle_like(post.id, fan.id).await.unwrap(), vec![author.id]);

    let stored = posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.likes, vec![author.id]);

    for text in ["one", "two"] {
        let comment = Comment::new(text.to_string(), post.id, fan.id).unwrap();
        comments.create(&comment).await.unwrap();
    }

    let counts = comments.count_by_posts(&[post.id]).await.unwrap();
    assert_eq!(counts.get(&post.id), Some(&2));

    let mut first = comments.find_by_post(post.id).await.unwrap().remove(0);
    first.edit(Some("edited".to_string()));
    comments.update(&first).await.unwrap();
    assert_eq!(
        comments.find_by_id(first.id).await.unwrap().unwrap().text,
        "edited"
    );

    assert_eq!(comments.delete_by_post(post.id).await.unwrap(), 2);
    posts.delete(post.id).await.unwrap();

    assert!(posts.find_by_id(post.id).await.unwrap().is_none());
    assert!(comments.find_by_post(post.id).await.unwrap().is_empty());

    let err = posts.toggle_like(post.id, fan.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

// ===== In-memory =====

#[tokio::test]
async fn test_in_memory_user_email_is_unique() {
    user_email_is_unique(&InMemoryUserRepository::new()).await;
}

#[tokio::test]
async fn test_in_memory_user_update() {
    user_update_persists_profile(&InMemoryUserRepository::new()).await;
}

#[tokio::test]
async fn test_in_memory_duplicate_application() {
    duplicate_application_is_conflict(
        &InMemoryUserRepository::new(),
        &InMemoryJobRepository::new(),
        &InMemoryApplicationRepository::new(),
    )
    .await;
}

#[tokio::test]
async fn test_in_memory_job_search() {
    job_search_filters(&InMemoryUserRepository::new(), &InMemoryJobRepository::new()).await;
}

#[tokio::test]
async fn test_in_memory_company_name_is_unique() {
    company_name_is_unique(&InMemoryUserRepository::new(), &InMemoryCompanyRepository::new()).await;
}

#[tokio::test]
async fn test_in_memory_likes_and_comments() {
    likes_toggle_and_comments_follow_post(
        &InMemoryUserRepository::new(),
        &InMemoryPostRepository::new(),
        &InMemoryCommentRepository::new(),
    )
    .await;
}

// ===== PostgreSQL =====

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_user_email_is_unique() {
    let pool = setup_test_db().await;
    user_email_is_unique(&PostgresUserRepository::new(pool)).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_user_update() {
    let pool = setup_test_db().await;
    user_update_persists_profile(&PostgresUserRepository::new(pool)).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_duplicate_application() {
    let pool = setup_test_db().await;
    duplicate_application_is_conflict(
        &PostgresUserRepository::new(pool.clone()),
        &PostgresJobRepository::new(pool.clone()),
        &PostgresApplicationRepository::new(pool),
    )
    .await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_job_search() {
    let pool = setup_test_db().await;
    job_search_filters(
        &PostgresUserRepository::new(pool.clone()),
        &PostgresJobRepository::new(pool),
    )
    .await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_company_name_is_unique() {
    let pool = setup_test_db().await;
    company_name_is_unique(
        &PostgresUserRepository::new(pool.clone()),
        &PostgresCompanyRepository::new(pool),
    )
    .await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_likes_and_comments() {
    let pool = setup_test_db().await;
    likes_toggle_and_comments_follow_post(
        &PostgresUserRepository::new(pool.clone()),
        &PostgresPostRepository::new(pool.clone()),
        &PostgresCommentRepository::new(pool),
    )
    .await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_comment_on_missing_post_is_not_found() {
    let pool = setup_test_db().await;
    let users = PostgresUserRepository::new(pool.clone());
    let comments = PostgresCommentRepository::new(pool);

    let author = test_user(Role::Candidate);
    users.create(&author).await.unwrap();

    let comment = Comment::new("orphan".to_string(), Uuid::new_v4(), author.id).unwrap();
    let err = comments.create(&comment).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { entity: "Post", .. }));
}
