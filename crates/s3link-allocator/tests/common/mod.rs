#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use s3link_core::store::Result;
use s3link_core::{NewObject, ObjectStore, PutOutcome, ShortCode, StorageError, StoredObject};
use s3link_generator::Generator;
use s3link_storage::InMemoryObjectStore;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Which store call a fault applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Get,
    Put,
    PutIfAbsent,
    PutIfMatch,
    Exists,
}

#[derive(Debug, Default)]
struct Counters {
    gets: AtomicUsize,
    puts: AtomicUsize,
    conditional_puts: AtomicUsize,
    existence_checks: AtomicUsize,
}

/// Wraps an [`InMemoryObjectStore`], counting calls and injecting failures.
#[derive(Debug, Clone, Default)]
pub struct FaultyStore {
    inner: InMemoryObjectStore,
    counters: Arc<Counters>,
    faults: Arc<Mutex<Vec<(Op, String)>>>,
    race_winners: Arc<Mutex<Vec<(String, String)>>>,
}

impl FaultyStore {
    pub fn new(inner: InMemoryObjectStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Makes every `op` on `key` fail with [`StorageError::Unavailable`].
    pub fn fail(&self, op: Op, key: &str) {
        self.faults.lock().push((op, key.to_string()));
    }

    /// Simulates another caller writing `code` to `state_key` right
    /// before this store's next conditional write to it.
    pub fn lose_race(&self, state_key: &str, code: &str) {
        self.race_winners
            .lock()
            .push((state_key.to_string(), code.to_string()));
    }

    pub fn gets(&self) -> usize {
        self.counters.gets.load(Ordering::SeqCst)
    }

    pub fn existence_checks(&self) -> usize {
        self.counters.existence_checks.load(Ordering::SeqCst)
    }

    /// Both plain and conditional write attempts.
    pub fn writes(&self) -> usize {
        self.counters.puts.load(Ordering::SeqCst)
            + self.counters.conditional_puts.load(Ordering::SeqCst)
    }

    /// Lets a pending [`FaultyStore::lose_race`] winner commit first.
    async fn run_race(&self, key: &str) -> Result<()> {
        let winner = {
            let mut winners = self.race_winners.lock();
            winners
                .iter()
                .position(|(k, _)| k == key)
                .map(|idx| winners.remove(idx))
        };
        if let Some((_, code)) = winner {
            self.inner.put(key, NewObject::private(code)).await?;
        }
        Ok(())
    }

    fn check(&self, op: Op, key: &str) -> Result<()> {
        let failing = self
            .faults
            .lock()
            .iter()
            .any(|(o, k)| *o == op && k == key);
        if failing {
            return Err(StorageError::Unavailable(format!("injected {op:?} failure on {key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for FaultyStore {
    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        self.counters.gets.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Get, key)?;
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, object: NewObject) -> Result<()> {
        self.counters.puts.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Put, key)?;
        self.inner.put(key, object).await
    }

    async fn put_if_absent(&self, key: &str, object: NewObject) -> Result<PutOutcome> {
        self.counters.conditional_puts.fetch_add(1, Ordering::SeqCst);
        self.check(Op::PutIfAbsent, key)?;
        self.run_race(key).await?;
        self.inner.put_if_absent(key, object).await
    }

    async fn put_if_match(&self, key: &str, object: NewObject, etag: &str) -> Result<PutOutcome> {
        self.counters.conditional_puts.fetch_add(1, Ordering::SeqCst);
        self.check(Op::PutIfMatch, key)?;
        self.run_race(key).await?;
        self.inner.put_if_match(key, object, etag).await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.counters.existence_checks.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Exists, key)?;
        self.inner.exists(key).await
    }
}

/// Hands out a fixed sequence of codes, then panics.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: Mutex::new(codes.into_iter().map(Into::into).collect()),
        }
    }

    /// A generator that repeats `code` `times` times.
    pub fn repeating(code: &str, times: usize) -> Self {
        Self::new(std::iter::repeat(code).take(times))
    }
}

impl Generator for ScriptedGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code = self
            .codes
            .lock()
            .pop_front()
            .expect("scripted generator ran out of codes");
        ShortCode::new_unchecked(code)
    }
}

/// Stores a redirect object at each of `codes`, as if previously allocated.
pub async fn occupy(store: &InMemoryObjectStore, codes: &[&str]) {
    for code in codes {
        store
            .put(code, NewObject::public_redirect("https://taken.example/"))
            .await
            .unwrap();
    }
}
