use chrono::Duration;

use crate::{
    conf::settings,
    pkg::{internal::session::Session, server::state::db_pool},
    prelude::Result,
};

pub async fn issue(email: &str, name: &str) -> Result<()> {
    let pool = db_pool()?;
    let session = Session::issue(&pool, email, name, Duration::hours(settings.session_ttl_hours)).await?;
    tracing::info!("issued session for {}", &session.user.email);
    println!("{}", session.token);
    Ok(())
}
