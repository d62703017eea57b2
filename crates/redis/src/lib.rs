//! Redis backend for wordrank.
//!
//! [`RedisStore`] maps each [`SortedSetStore`] primitive onto one Redis
//! sorted-set command over a shared [`ConnectionManager`], which reconnects on
//! its own after a dropped connection. Command failures surface as
//! [`StoreError`]s; nothing is retried here.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wordrank_core::{MemberWrite, ScoreBound, SortedSetStore, StoreError};

/// Where to find the Redis server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
	pub host: String,
	pub port: u16,
	/// Logical database index.
	pub db: i64,
	/// Upper bound on establishing the first connection.
	pub connect_timeout_ms: u64,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			host: "localhost".to_string(),
			port: 6379,
			db: 0,
			connect_timeout_ms: 2000,
		}
	}
}

impl StoreConfig {
	/// Connection URL in `redis://host:port/db` form.
	pub fn url(&self) -> String {
		format!("redis://{}:{}/{}", self.host, self.port, self.db)
	}

	pub fn connect_timeout(&self) -> Duration {
		Duration::from_millis(self.connect_timeout_ms)
	}
}

/// Failure to establish the initial connection.
#[derive(Debug, Error)]
pub enum ConnectError {
	#[error("invalid redis url {url}: {source}")]
	Url {
		url: String,
		#[source]
		source: RedisError,
	},
	#[error("could not connect to {url}: {source}")]
	Connect {
		url: String,
		#[source]
		source: RedisError,
	},
	#[error("timed out connecting to {url} after {timeout:?}")]
	Timeout { url: String, timeout: Duration },
}

/// Sorted-set store backed by a Redis server.
#[derive(Clone)]
pub struct RedisStore {
	conn: ConnectionManager,
}

impl fmt::Debug for RedisStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RedisStore").finish_non_exhaustive()
	}
}

impl RedisStore {
	/// Connects using `config`.
	pub async fn connect(config: &StoreConfig) -> Result<Self, ConnectError> {
		Self::open(&config.url(), config.connect_timeout()).await
	}

	/// Connects to `url`, giving up after `timeout`.
	pub async fn open(url: &str, timeout: Duration) -> Result<Self, ConnectError> {
		let client = Client::open(url).map_err(|source| ConnectError::Url { url: url.to_string(), source })?;
		let conn = tokio::time::timeout(timeout, ConnectionManager::new(client))
			.await
			.map_err(|_| ConnectError::Timeout { url: url.to_string(), timeout })?
			.map_err(|source| ConnectError::Connect { url: url.to_string(), source })?;

		tracing::info!(url, "redis.connected");
		Ok(Self { conn })
	}
}

fn failed(op: &'static str) -> impl FnOnce(RedisError) -> StoreError {
	move |err| {
		tracing::debug!(op, error = %err, "redis.command_failed");
		StoreError::new(op, err)
	}
}

/// Builds `ZADD key [NX] score member` for one write.
fn zadd(key: &str, write: &MemberWrite) -> redis::Cmd {
	let mut cmd = redis::cmd("ZADD");
	cmd.arg(key);
	if write.only_if_absent {
		cmd.arg("NX");
	}
	cmd.arg(write.score).arg(&write.member);
	cmd
}

#[async_trait]
impl SortedSetStore for RedisStore {
	async fn add_atomic(&self, key: &str, writes: &[MemberWrite]) -> Result<(), StoreError> {
		let mut pipe = redis::pipe();
		pipe.atomic();
		for write in writes {
			pipe.add_command(zadd(key, write)).ignore();
		}
		let mut conn = self.conn.clone();
		let () = pipe.query_async(&mut conn).await.map_err(failed("MULTI"))?;
		Ok(())
	}

	async fn add(&self, key: &str, member: &str, score: f64) -> Result<(), StoreError> {
		let mut conn = self.conn.clone();
		let () = zadd(key, &MemberWrite::upsert(member, score)).query_async(&mut conn).await.map_err(failed("ZADD"))?;
		Ok(())
	}

	async fn score(&self, key: &str, member: &str) -> Result<Option<f64>, StoreError> {
		let mut conn = self.conn.clone();
		let score: Option<f64> = redis::cmd("ZSCORE").arg(key).arg(member).query_async(&mut conn).await.map_err(failed("ZSCORE"))?;
		Ok(score)
	}

	async fn increment(&self, key: &str, member: &str, delta: f64) -> Result<f64, StoreError> {
		let mut conn = self.conn.clone();
		let score: f64 = redis::cmd("ZINCRBY").arg(key).arg(delta).arg(member).query_async(&mut conn).await.map_err(failed("ZINCRBY"))?;
		Ok(score)
	}

	async fn range_by_score_desc(&self, key: &str, max: ScoreBound, min: ScoreBound, offset: usize, count: usize) -> Result<Vec<(String, f64)>, StoreError> {
		let mut conn = self.conn.clone();
		let entries: Vec<(String, f64)> = redis::cmd("ZREVRANGEBYSCORE")
			.arg(key)
			.arg(max.to_string())
			.arg(min.to_string())
			.arg("WITHSCORES")
			.arg("LIMIT")
			.arg(offset)
			.arg(count)
			.query_async(&mut conn)
			.await
			.map_err(failed("ZREVRANGEBYSCORE"))?;
		Ok(entries)
	}
}
