use crate::allocator::Allocator;
use crate::error::{AllocatorError, Result};
use async_trait::async_trait;
use s3link_core::{LookupKey, NewObject, ObjectStore, PutOutcome, RedirectTemplate, ShortCode};
use s3link_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};
use typed_builder::TypedBuilder;

/// Key prefix under which state records are stored unless configured otherwise.
pub const DEFAULT_STATE_PREFIX: &str = "state/";

/// Candidate draws per allocation before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Configures a [`LinkAllocator`].
///
/// Code length, alphabet and link prefix belong to the generator.
#[derive(Debug, Clone, TypedBuilder)]
pub struct AllocatorSettings {
    /// Prefix of every state record key.
    #[builder(default = DEFAULT_STATE_PREFIX.to_string(), setter(into))]
    pub state_prefix: String,
    /// Template producing the redirect target from a lookup key.
    #[builder(default)]
    pub redirect_template: RedirectTemplate,
    /// Upper bound on candidate draws within one allocation.
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// What the state record for a lookup key currently holds.
enum StateRecord {
    Missing,
    /// An empty body left by an interrupted write. Overwritten only while
    /// its entity tag is unchanged.
    Empty { etag: String },
    Allocated(ShortCode),
}

/// Allocates short codes for lookup keys against an [`ObjectStore`].
///
/// Each allocation is a strictly sequential series of store calls:
/// read the state record, check candidates until one is free, write the
/// state record, then write the redirect object.
///
/// The state record is written conditionally: create-if-absent when there
/// is none, and replace-if-unchanged over an empty placeholder. When two
/// callers race on the same key exactly one code wins and the loser
/// returns it. Codes themselves are only protected by the existence check.
#[derive(Debug, Clone)]
pub struct LinkAllocator<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    settings: AllocatorSettings,
}

impl<S: ObjectStore, G: Generator> LinkAllocator<S, G> {
    /// Creates a new `LinkAllocator`.
    ///
    /// Fails with [`AllocatorError::Configuration`] if `max_attempts` is zero.
    pub fn new(store: S, generator: G, settings: AllocatorSettings) -> Result<Self> {
        if settings.max_attempts == 0 {
            return Err(AllocatorError::Configuration(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            settings,
        })
    }

    /// Builds the redirect target for `key` from the configured template.
    pub fn redirect_target(&self, key: &str) -> String {
        self.settings.redirect_template.format(key)
    }

    async fn read_state(&self, key: &LookupKey) -> Result<StateRecord> {
        let state_key = key.state_key(&self.settings.state_prefix);

        let Some(record) = self.store.get(&state_key).await? else {
            trace!(key = %key, "no state record");
            return Ok(StateRecord::Missing);
        };

        match ShortCode::from_state_record(&record.body)? {
            Some(code) => Ok(StateRecord::Allocated(code)),
            None => {
                debug!(key = %key, "state record is empty, treating as absent");
                Ok(StateRecord::Empty { etag: record.etag })
            }
        }
    }

    /// Draws candidates until one has no redirect object behind it.
    async fn find_free_code(&self) -> Result<ShortCode> {
        let max_attempts = self.settings.max_attempts;

        for attempt in 1..=max_attempts {
            let code: ShortCode = self.generator.generate().into();

            if !self.store.exists(code.as_str()).await? {
                trace!(code = %code, attempt, "found free short code");
                return Ok(code);
            }

            debug!(code = %code, attempt, "short code taken, drawing again");
        }

        Err(AllocatorError::IdentifierSpaceExhausted {
            attempts: max_attempts,
        })
    }
}

#[async_trait]
impl<S: ObjectStore, G: Generator> Allocator for LinkAllocator<S, G> {
    async fn allocate(&self, key: &LookupKey) -> Result<ShortCode> {
        let placeholder = match self.read_state(key).await? {
            StateRecord::Allocated(code) => {
                debug!(key = %key, code = %code, "lookup key already allocated");
                return Ok(code);
            }
            StateRecord::Empty { etag } => Some(etag),
            StateRecord::Missing => None,
        };

        let code = self.find_free_code().await?;

        let state_key = key.state_key(&self.settings.state_prefix);
        let state = NewObject::private(code.as_str());
        let outcome = match placeholder.as_deref() {
            Some(etag) => self.store.put_if_match(&state_key, state, etag).await?,
            None => self.store.put_if_absent(&state_key, state).await?,
        };
        if outcome != PutOutcome::Written {
            warn!(key = %key, code = %code, "lookup key allocated concurrently, discarding candidate");
            return match self.read_state(key).await? {
                StateRecord::Allocated(winner) => Ok(winner),
                StateRecord::Missing | StateRecord::Empty { .. } => {
                    Err(AllocatorError::Conflict(key.to_string()))
                }
            };
        }

        let redirect = NewObject::public_redirect(self.redirect_target(key.as_str()));
        if let Err(source) = self.store.put(code.as_str(), redirect).await {
            warn!(key = %key, code = %code, error = %source, "redirect object write failed after state record was written");
            return Err(AllocatorError::PartialCommit {
                key: key.to_string(),
                code: code.to_string(),
                source,
            });
        }

        info!(key = %key, code = %code, "allocated short code");
        Ok(code)
    }

    async fn resolve(&self, key: &LookupKey) -> Result<Option<ShortCode>> {
        match self.read_state(key).await? {
            StateRecord::Allocated(code) => Ok(Some(code)),
            StateRecord::Missing | StateRecord::Empty { .. } => Ok(None),
        }
    }
}
