use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::{PgPool, prelude::FromRow};
use uuid::Uuid;

use crate::{
    pkg::server::state::GetTxn,
    prelude::{Error, Result},
};

#[derive(FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

impl User {
    /// Name shown in greetings: the user's name, else the local part of the email.
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            return &self.name;
        }
        match self.email.split_once('@') {
            Some((local, _)) if !local.is_empty() => local,
            _ => "there",
        }
    }
}

/// An authenticated caller. Passed explicitly to every screen operation.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Uuid,
    pub user: User,
}

#[derive(FromRow)]
struct SessionRow {
    token: Uuid,
    user_id: String,
    email: String,
    name: String,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            token: row.token,
            user: User {
                user_id: row.user_id,
                email: row.email,
                name: row.name,
            },
        }
    }
}

pub fn require(session: Option<&Session>) -> Result<&Session> {
    session.ok_or(Error::Unauthenticated)
}

impl Session {
    pub fn owner_id(&self) -> &str {
        &self.user.user_id
    }

    pub async fn issue(pool: &PgPool, email: &str, name: &str, ttl: Duration) -> Result<Self> {
        let mut tx = pool.begin_txn().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET name = $2
            RETURNING user_id, email, name
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(Uuid::new_v4().to_string())
        .fetch_one(&mut *tx)
        .await?;
        let token: Uuid = sqlx::query_scalar(
            "INSERT INTO sessions (user_id, expiry) VALUES ($1, $2) RETURNING token",
        )
        .bind(&user.user_id)
        .bind(Utc::now() + ttl)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(Session { token, user })
    }

    pub async fn lookup(pool: &PgPool, token_str: &str) -> Result<Option<Self>> {
        let Ok(token) = token_str.parse::<Uuid>() else {
            tracing::debug!("malformed session token");
            return Ok(None);
        };
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT s.token, u.user_id, u.email, u.name
            FROM sessions s
            JOIN users u ON u.user_id = s.user_id
            WHERE s.token = $1
            AND NOT s.revoked
            AND s.expiry > now()
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(Session::from))
    }

    pub async fn revoke(&self, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE sessions SET revoked = true WHERE token = $1")
            .bind(self.token)
            .execute(pool)
            .await?;
        tracing::info!("User {} logged out successfully", &self.user.name);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_session(user_id: &str, name: &str) -> Session {
    Session {
        token: Uuid::new_v4(),
        user: User {
            user_id: user_id.to_string(),
            email: format!("{}@example.com", user_id),
            name: name.to_string(),
        },
    }
}

#[cfg(test)]
pub(crate) fn unreachable_pool() -> PgPool {
    sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy("postgres://jobtrack@127.0.0.1:1/jobtrack")
        .unwrap()
}
