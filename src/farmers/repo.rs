use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::farmers::repo_types::{Farmer, ProfileChanges};

/// Credential store: how the service reads and mutates farmer records.
/// Uniqueness of email and atomicity of create are the store's job.
#[async_trait]
pub trait FarmerStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Farmer>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Farmer>>;
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> anyhow::Result<Farmer>;
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> anyhow::Result<Option<Farmer>>;
    async fn update_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgFarmerStore {
    pool: PgPool,
}

impl PgFarmerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FarmerStore for PgFarmerStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Farmer>> {
        let farmer = sqlx::query_as::<_, Farmer>(
            r#"
            SELECT id, name, email, password_hash, role, profile_picture, created_at
            FROM farmers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(farmer)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Farmer>> {
        let farmer = sqlx::query_as::<_, Farmer>(
            r#"
            SELECT id, name, email, password_hash, role, profile_picture, created_at
            FROM farmers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(farmer)
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> anyhow::Result<Farmer> {
        let farmer = sqlx::query_as::<_, Farmer>(
            r#"
            INSERT INTO farmers (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, profile_picture, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(farmer)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> anyhow::Result<Option<Farmer>> {
        let farmer = sqlx::query_as::<_, Farmer>(
            r#"
            UPDATE farmers
            SET name = COALESCE($2, name),
                role = COALESCE($3, role),
                profile_picture = COALESCE($4, profile_picture)
            WHERE id = $1
            RETURNING id, name, email, password_hash, role, profile_picture, created_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.role)
        .bind(changes.profile_picture)
        .fetch_optional(&self.pool)
        .await?;
        Ok(farmer)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE farmers SET password_hash = $2 WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM farmers WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// In-memory store used by `AppState::fake()` and unit tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    farmers: Arc<Mutex<HashMap<Uuid, Farmer>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FarmerStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Farmer>> {
        let farmers = self.farmers.lock().unwrap();
        Ok(farmers.values().find(|f| f.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Farmer>> {
        let farmers = self.farmers.lock().unwrap();
        Ok(farmers.get(&id).cloned())
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> anyhow::Result<Farmer> {
        let mut farmers = self.farmers.lock().unwrap();
        if farmers.values().any(|f| f.email == email) {
            anyhow::bail!("duplicate email: {email}");
        }
        let farmer = Farmer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
            profile_picture: None,
            created_at: OffsetDateTime::now_utc(),
        };
        farmers.insert(farmer.id, farmer.clone());
        Ok(farmer)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> anyhow::Result<Option<Farmer>> {
        let mut farmers = self.farmers.lock().unwrap();
        Ok(farmers.get_mut(&id).map(|farmer| {
            if let Some(name) = changes.name {
                farmer.name = name;
            }
            if let Some(role) = changes.role {
                farmer.role = role;
            }
            if let Some(picture) = changes.profile_picture {
                farmer.profile_picture = Some(picture);
            }
            farmer.clone()
        }))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> anyhow::Result<bool> {
        let mut farmers = self.farmers.lock().unwrap();
        match farmers.get_mut(&id) {
            Some(farmer) => {
                farmer.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut farmers = self.farmers.lock().unwrap();
        Ok(farmers.remove(&id).is_some())
    }
}
