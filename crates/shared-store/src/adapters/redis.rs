//! Redis-backed atomic store.
//!
//! Multi-step operations run as Lua scripts, which Redis executes without
//! interleaving other commands. Single-command operations (`SET NX EX`, `DEL`,
//! `EXPIRE`) are atomic on their own.
//!
//! Connection management and reconnects are left to
//! `redis::aio::ConnectionManager`.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Script, Value};
use tracing::debug;

use crate::error::StoreError;
use crate::ports::AtomicStore;

/// KEYS[1]: bit array key. ARGV: offsets.
const SET_BITS_SCRIPT: &str = r#"
for _, offset in ipairs(ARGV) do
    redis.call("SETBIT", KEYS[1], offset, 1)
end
return 1
"#;

/// KEYS[1]: bit array key. ARGV: offsets.
/// Lua `false` becomes a nil reply, which reads as "not all set".
const TEST_BITS_SCRIPT: &str = r#"
for _, offset in ipairs(ARGV) do
    if tonumber(redis.call("GETBIT", KEYS[1], offset)) == 0 then
        return false
    end
end
return true
"#;

/// KEYS[1]: lock key. ARGV[1]: expected value.
const DELETE_IF_EQUALS_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

/// [`AtomicStore`] over a Redis connection.
#[derive(Clone)]
pub struct RedisAtomicStore {
    conn: ConnectionManager,
    set_bits: Script,
    test_bits: Script,
    delete_if_equals: Script,
}

impl RedisAtomicStore {
    /// Connect to the Redis server at `url` (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        debug!(url = %url, "Connected to Redis");
        Ok(Self::from_connection(conn))
    }

    /// Wrap an existing connection manager.
    pub fn from_connection(conn: ConnectionManager) -> Self {
        Self {
            conn,
            set_bits: Script::new(SET_BITS_SCRIPT),
            test_bits: Script::new(TEST_BITS_SCRIPT),
            delete_if_equals: Script::new(DELETE_IF_EQUALS_SCRIPT),
        }
    }
}

fn unrecognized(operation: &'static str, reply: &Value) -> StoreError {
    StoreError::UnrecognizedResponse {
        operation,
        detail: format!("{:?}", reply),
    }
}

/// Lua `true` arrives as 1, `false` as nil.
fn parse_test_bits(reply: Value) -> Result<bool, StoreError> {
    match reply {
        Value::Int(1) => Ok(true),
        Value::Int(0) | Value::Nil => Ok(false),
        other => Err(unrecognized("test_bits", &other)),
    }
}

/// `SET NX` answers OK when it wrote the key and nil when the key existed.
fn parse_set_if_absent(reply: Value) -> Result<bool, StoreError> {
    match reply {
        Value::Okay => Ok(true),
        Value::Nil => Ok(false),
        other => Err(unrecognized("set_if_absent", &other)),
    }
}

fn parse_delete_if_equals(reply: Value) -> Result<bool, StoreError> {
    match reply {
        Value::Int(1) => Ok(true),
        Value::Int(0) => Ok(false),
        other => Err(unrecognized("delete_if_equals", &other)),
    }
}

#[async_trait]
impl AtomicStore for RedisAtomicStore {
    async fn set_bits(&self, key: &str, offsets: &[u64]) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: Value = self
            .set_bits
            .key(key)
            .arg(offsets)
            .invoke_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn test_bits(&self, key: &str, offsets: &[u64]) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let reply: Value = self
            .test_bits
            .key(key)
            .arg(offsets)
            .invoke_async(&mut conn)
            .await?;

        parse_test_bits(reply)
    }

    async fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let reply: Value = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await?;

        parse_set_if_absent(reply)
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();
        let reply: Value = self
            .delete_if_equals
            .key(key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await?;

        parse_delete_if_equals(reply)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: Value = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: Value = redis::cmd("EXPIRE")
            .arg(key)
            .arg(ttl_seconds)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}
