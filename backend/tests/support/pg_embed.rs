//! Embedded PostgreSQL bootstrap shared by the Diesel adapter suites.
//!
//! Each suite starts its own [`TestCluster`], recreates a named database,
//! applies the crate's migrations and hands back a pool. The cluster writes
//! under the target directory unless `PG_RUNTIME_DIR` and `PG_DATA_DIR` are
//! already set.
//!
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start; suites then skip
//! instead of failing.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use academy::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn unique_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let base = pg_embed_target_dir().join(format!(
        "bootstrap-{}-{}",
        std::process::id(),
        Uuid::new_v4()
    ));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

fn is_transient_error(err: &str) -> bool {
    let err = err.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| err.contains(pattern))
}

/// Start an embedded cluster, retrying transient download failures.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = unique_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient_error(&last_error) {
                    break;
                }
                let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                eprintln!("pg-embed: attempt {} failed, retrying in {delay:?}", attempt + 1);
                std::thread::sleep(delay);
            }
        }
    }
    Err(last_error)
}

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when allowed, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Render a `postgres` error with its SQLSTATE and detail.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// A migrated database on a private cluster.
pub struct MigratedDatabase {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    _cluster: TestCluster,
}

impl MigratedDatabase {
    /// Recreate `name`, apply migrations and open a small pool.
    pub fn provision(name: &str) -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = test_cluster()?;
        reset_database(&cluster, name)?;
        let url = cluster.connection().database_url(name);
        runtime
            .block_on(run_migrations(&url))
            .map_err(|err| err.to_string())?;

        let config = PoolConfig::new(&url).with_max_size(2).with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            url,
            _cluster: cluster,
        })
    }

    /// Number of rows in `table`, read outside the pool.
    pub fn count_rows(&self, table: &str) -> i64 {
        let mut client = Client::connect(&self.url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));
        let row = client
            .query_one(&format!("SELECT COUNT(*) FROM {table}"), &[])
            .unwrap_or_else(|err| panic!("count {table}: {}", format_postgres_error(&err)));
        row.get(0)
    }
}

/// Fixed instant shared by every record a suite creates.
pub fn instant(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::minutes(offset_minutes)
}
