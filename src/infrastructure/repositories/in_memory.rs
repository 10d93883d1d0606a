//! In-memory repository implementations
//!
//! Used for local development (`STORAGE=memory`) and the test suites.
//! Unique constraints are emulated with secondary `DashMap` indexes whose
//! `entry` API makes check-and-insert atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::application::{Application, ApplicationStatus};
use crate::domain::comment::Comment;
use crate::domain::company::Company;
use crate::domain::job::{Job, JobFilter};
use crate::domain::post::Post;
use crate::domain::repositories::{
    ApplicationRepository, CommentRepository, CompanyRepository, JobRepository, PostRepository,
    RepositoryError, RepositoryResult, UserRepository,
};
use crate::domain::user::{Email, ProfileUpdate, User};

fn newest_first<T>(mut items: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

fn collect_ids<T: Clone>(map: &DashMap<Uuid, T>, ids: &[Uuid]) -> Vec<T> {
    ids.iter()
        .filter_map(|id| map.get(id).map(|entry| entry.value().clone()))
        .collect()
}

// ===== Users =====

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<Uuid, User>,
    emails: DashMap<String, Uuid>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<()> {
        match self.emails.entry(user.email.as_str().to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict("User already exists".to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        let id = self.emails.get(email.as_str()).map(|entry| *entry.value());
        Ok(id.and_then(|id| self.users.get(&id).map(|u| u.value().clone())))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>> {
        Ok(collect_ids(&self.users, ids))
    }

    async fn update_profile(&self, id: Uuid, changes: &ProfileUpdate) -> RepositoryResult<User> {
        // The entry's write lock serialises edits to the same user
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("User", id))?;

        if let Some(email) = changes.email.as_ref().filter(|e| **e != user.email) {
            match self.emails.entry(email.as_str().to_string()) {
                Entry::Occupied(_) => {
                    return Err(RepositoryError::Conflict("User already exists".to_string()))
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.emails.remove(user.email.as_str());
        }

        changes.apply_to(&mut user);
        Ok(user.clone())
    }
}

// ===== Companies =====

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: DashMap<Uuid, Company>,
    names: DashMap<String, Uuid>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn create(&self, company: &Company) -> RepositoryResult<()> {
        match self.names.entry(company.name.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict("Company already exists".to_string())),
            Entry::Vacant(slot) => {
                slot.insert(company.id);
                self.companies.insert(company.id, company.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>> {
        Ok(self.companies.get(&id).map(|c| c.value().clone()))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Company>> {
        let all = self.companies.iter().map(|c| c.value().clone()).collect();
        Ok(newest_first(all, |c: &Company| c.created_at))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Company>> {
        Ok(collect_ids(&self.companies, ids))
    }
}

// ===== Jobs =====

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: DashMap<Uuid, Job>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, predicate: impl Fn(&Job) -> bool) -> Vec<Job> {
        let matching = self
            .jobs
            .iter()
            .filter(|j| predicate(j.value()))
            .map(|j| j.value().clone())
            .collect();
        newest_first(matching, Job::created_at)
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &Job) -> RepositoryResult<()> {
        self.jobs.insert(job.id(), job.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Job>> {
        Ok(self.jobs.get(&id).map(|j| j.value().clone()))
    }

    async fn search(&self, filter: &JobFilter) -> RepositoryResult<Vec<Job>> {
        Ok(self.select(|job| filter.matches(job)))
    }

    async fn find_by_creator(&self, user_id: Uuid) -> RepositoryResult<Vec<Job>> {
        Ok(self.select(|job| job.is_created_by(user_id)))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Job>> {
        Ok(collect_ids(&self.jobs, ids))
    }

    async fn count(&self, since: Option<DateTime<Utc>>) -> RepositoryResult<u64> {
        let count = self
            .jobs
            .iter()
            .filter(|j| since.map_or(true, |since| j.created_at() >= since))
            .count();
        Ok(count as u64)
    }
}

// ===== Applications =====

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: DashMap<Uuid, Application>,
    /// (job, applicant) -> application id
    pairs: DashMap<(Uuid, Uuid), Uuid>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&self, predicate: impl Fn(&Application) -> bool) -> Vec<Application> {
        let matching = self
            .applications
            .iter()
            .filter(|a| predicate(a.value()))
            .map(|a| a.value().clone())
            .collect();
        newest_first(matching, |a: &Application| a.created_at)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn create(&self, application: &Application) -> RepositoryResult<()> {
        match self.pairs.entry((application.job, application.applicant)) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(Application::DUPLICATE_MESSAGE.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(application.id);
                self.applications.insert(application.id, application.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Application>> {
        Ok(self.applications.get(&id).map(|a| a.value().clone()))
    }

    async fn find_by_job(&self, job_id: Uuid) -> RepositoryResult<Vec<Application>> {
        Ok(self.select(|a| a.job == job_id))
    }

    async fn find_by_applicant(&self, applicant_id: Uuid) -> RepositoryResult<Vec<Application>> {
        Ok(self.select(|a| a.applicant == applicant_id))
    }

    async fn find_by_jobs(&self, job_ids: &[Uuid]) -> RepositoryResult<Vec<Application>> {
        Ok(self.select(|a| job_ids.contains(&a.job)))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> RepositoryResult<Application> {
        let mut application = self
            .applications
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Application", id))?;

        application.status = status;
        application.updated_at = Utc::now();
        Ok(application.clone())
    }
}

// ===== Posts =====

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: DashMap<Uuid, Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> RepositoryResult<()> {
        self.posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.value().clone()))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Post>> {
        let all = self.posts.iter().map(|p| p.value().clone()).collect();
        Ok(newest_first(all, |p: &Post| p.created_at))
    }

    async fn update(&self, post: &Post) -> RepositoryResult<()> {
        let mut stored = self
            .posts
            .get_mut(&post.id)
            .ok_or_else(|| RepositoryError::not_found("Post", post.id))?;

        stored.content = post.content.clone();
        stored.image = post.image.clone();
        stored.updated_at = post.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Post", id))
    }

    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> RepositoryResult<Vec<Uuid>> {
        let mut post = self
            .posts
            .get_mut(&post_id)
            .ok_or_else(|| RepositoryError::not_found("Post", post_id))?;

        post.toggle_like(user_id);
        Ok(post.likes.clone())
    }
}

// ===== Comments =====

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: DashMap<Uuid, Comment>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: &Comment) -> RepositoryResult<()> {
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_post(&self, post_id: Uuid) -> RepositoryResult<Vec<Comment>> {
        let matching = self
            .comments
            .iter()
            .filter(|c| c.post == post_id)
            .map(|c| c.value().clone())
            .collect();
        Ok(newest_first(matching, |c: &Comment| c.created_at))
    }

    async fn count_by_posts(&self, post_ids: &[Uuid]) -> RepositoryResult<HashMap<Uuid, u64>> {
        let mut counts = HashMap::new();
        for comment in self.comments.iter() {
            if post_ids.contains(&comment.post) {
                *counts.entry(comment.post).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn update(&self, comment: &Comment) -> RepositoryResult<()> {
        let mut stored = self
            .comments
            .get_mut(&comment.id)
            .ok_or_else(|| RepositoryError::not_found("Comment", comment.id))?;

        stored.text = comment.text.clone();
        stored.updated_at = comment.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.comments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Comment", id))
    }

    async fn delete_by_post(&self, post_id: Uuid) -> RepositoryResult<u64> {
        let mut removed = 0u64;
        self.comments.retain(|_, c| {
            let keep = c.post != post_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}
