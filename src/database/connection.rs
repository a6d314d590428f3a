use std::future::Future;
use std::time::Duration;

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use super::migrations::Migrator;

/// Bounded retry with a linear backoff, used only while waiting for the
/// database to come up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_step: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Wait after the given failed attempt (1-based) before trying again.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

/// Runs `connect` until it succeeds or the policy is exhausted.
///
/// Returns the last error once every attempt has failed; no sleep follows
/// the final attempt.
pub async fn connect_with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut connect: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match connect().await {
            Ok(handle) => {
                info!("Successfully connected to database");
                return Ok(handle);
            }
            Err(err) => {
                warn!(
                    "Database connection attempt {}/{} failed: {}",
                    attempt, policy.max_attempts, err
                );
                if attempt >= policy.max_attempts {
                    return Err(err);
                }
                tokio::time::sleep(policy.delay_after(attempt)).await;
                attempt += 1;
            }
        }
    }
}

pub async fn establish_connection(database_url: &str, policy: &RetryPolicy) -> Result<DatabaseConnection, DbErr> {
    connect_with_retry(policy, || Database::connect(database_url)).await
}

/// Connects or terminates the process with a non-zero status.
pub async fn connect_or_exit(database_url: &str, policy: &RetryPolicy) -> DatabaseConnection {
    match establish_connection(database_url, policy).await {
        Ok(db) => db,
        Err(err) => {
            error!(
                "Failed to connect to database after {} attempts: {}",
                policy.max_attempts, err
            );
            std::process::exit(1);
        }
    }
}

pub async fn setup_database(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Database migrations completed");
    Ok(())
}
