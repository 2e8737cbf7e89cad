//! Database Test Utilities
//!
//! Provides a migrated PostgreSQL database for integration tests, either
//! from `TEST_DATABASE_URL` or from a testcontainer started on first use.
//!
//! Tests hold a [`TestDatabase`] for their whole body. Holding one
//! serializes database tests within the process and starts from empty
//! tables.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use sqlx::PgPool;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::{Mutex, MutexGuard, OnceCell};

use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresPolicyAdapter};

/// Environment variable naming an existing database to test against
pub const TEST_DATABASE_URL: &str = "TEST_DATABASE_URL";

const POSTGRES_USER: &str = "postgres";
const POSTGRES_PASSWORD: &str = "postgres";
const POSTGRES_DB: &str = "postgres";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Where the shared database server lives
struct SharedServer {
    url: String,
    _container: Option<ContainerAsync<Postgres>>,
}

/// `None` once startup has failed, so later tests skip without retrying
static SHARED_SERVER: OnceCell<Option<Arc<SharedServer>>> = OnceCell::const_new();

static DB_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

async fn start_server() -> Result<SharedServer, BoxError> {
    if let Ok(url) = std::env::var(TEST_DATABASE_URL) {
        return Ok(SharedServer {
            url,
            _container: None,
        });
    }

    let container = Postgres::default().start().await?;
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(5432).await?;

    Ok(SharedServer {
        url: format!("postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{host}:{port}/{POSTGRES_DB}"),
        _container: Some(container),
    })
}

async fn shared_server() -> Option<Arc<SharedServer>> {
    SHARED_SERVER
        .get_or_init(|| async {
            match start_server().await {
                Ok(server) => Some(Arc::new(server)),
                Err(e) => {
                    eprintln!("no test database available ({e}); database tests will be skipped");
                    None
                }
            }
        })
        .await
        .clone()
}

/// Exclusive access to a migrated, empty policy database
pub struct TestDatabase {
    pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

impl TestDatabase {
    /// Waits for exclusive access, then migrates and empties the database
    ///
    /// Returns `None` when no database can be reached; callers skip.
    pub async fn acquire() -> Option<Self> {
        let server = shared_server().await?;
        let guard = DB_LOCK.lock().await;

        match Self::prepare(&server.url).await {
            Ok(pool) => Some(Self {
                pool,
                _guard: guard,
            }),
            Err(e) => {
                eprintln!("test database at {} unusable: {e}", server.url);
                None
            }
        }
    }

    async fn prepare(url: &str) -> Result<PgPool, BoxError> {
        let config = DatabaseConfig::new(url)
            .max_connections(5)
            .connect_timeout(Duration::from_secs(30));
        let pool = create_pool(config).await?;
        run_migrations(&pool).await?;
        clear_data(&pool).await?;
        Ok(pool)
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// A policy adapter over this database
    pub fn adapter(&self) -> PostgresPolicyAdapter {
        PostgresPolicyAdapter::new(self.pool.clone())
    }

    /// Number of rows in `table`
    pub async fn count_rows(&self, table: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*)::BIGINT FROM {table}"))
            .fetch_one(&self.pool)
            .await
    }
}

/// Removes all policy records while preserving the schema
pub async fn clear_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE coverage, premium, policy, address, person CASCADE")
        .execute(pool)
        .await?;
    Ok(())
}

/// Runs a database test body, skipping when no database is available
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$db:ident| $body:block) => {
        #[tokio::test]
        async fn $name() {
            let Some($db) = $crate::database::TestDatabase::acquire().await else {
                eprintln!("skipping {}: no test database", stringify!($name));
                return;
            };
            $body
        }
    };
}
