// In crates/registry/src/lib.rs

//! Write-once store of resolved parameter variants.
//!
//! The registry lives in two phases:
//! 1. Initialization: `register` builds and stores variants, one per `(kind, timeframe)`.
//! 2. Frozen: after `freeze`, registrations are rejected and lookups read an
//!    immutable map without taking any lock.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use core_types::{ConfigError, Override, RecordKind, Result, Timeframe};
use params::{IndicatorParams, ParamSet, Record, StrategyParams};

type Key = (RecordKind, Timeframe);
type Entries = HashMap<Key, Record>;

/// Resolved parameter variants keyed by record kind and timeframe.
#[derive(Debug)]
pub struct ConfigRegistry {
    /// Entries collected during initialization. `None` once frozen.
    pending: Mutex<Option<Entries>>,
    frozen: OnceLock<Entries>,
}

impl ConfigRegistry {
    /// Creates an empty registry. Variants compose on the process-wide baselines.
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Some(HashMap::new())),
            frozen: OnceLock::new(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static ConfigRegistry {
        static GLOBAL: OnceLock<ConfigRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ConfigRegistry::new)
    }

    // Registration is single-threaded and a panic while holding the lock
    // cannot leave the map half-updated, so a poisoned lock is still usable.
    fn lock_pending(&self) -> MutexGuard<'_, Option<Entries>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds the `(kind, timeframe)` variant and stores it.
    ///
    /// # Errors
    ///
    /// * `RegistryFrozen` after [`ConfigRegistry::freeze`].
    /// * `DuplicateRegistration` if the key is already taken. The stored record is kept.
    /// * Any build error (`UnknownField`, `InvalidField`). Nothing is stored.
    pub fn register(
        &self,
        kind: RecordKind,
        timeframe: Timeframe,
        overrides: &[Override],
    ) -> Result<()> {
        let mut pending = self.lock_pending();
        let Some(entries) = pending.as_mut() else {
            tracing::warn!(%kind, %timeframe, "Rejected registration on a frozen parameter registry.");
            return Err(ConfigError::RegistryFrozen);
        };

        if entries.contains_key(&(kind, timeframe)) {
            tracing::warn!(%kind, %timeframe, "Rejected duplicate parameter registration.");
            return Err(ConfigError::DuplicateRegistration { kind, timeframe });
        }

        let record = params::build(kind, timeframe, overrides)
            .inspect_err(|e| tracing::error!(%kind, %timeframe, error = %e, "Invalid parameter overrides."))?;

        entries.insert((kind, timeframe), record);
        tracing::debug!(
            %kind,
            %timeframe,
            overrides = overrides.len(),
            "Registered parameter variant."
        );
        Ok(())
    }

    /// Closes the initialization phase and returns the number of stored variants.
    ///
    /// Calling it again has no effect.
    pub fn freeze(&self) -> usize {
        let mut pending = self.lock_pending();
        if let Some(entries) = pending.take() {
            let count = entries.len();
            // `pending` was still `Some`, so nothing has been frozen yet.
            let _ = self.frozen.set(entries);
            tracing::info!(variants = count, "Parameter registry frozen.");
        }
        drop(pending);
        self.len()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&Entries) -> R) -> R {
        if let Some(entries) = self.frozen.get() {
            return f(entries);
        }
        let pending = self.lock_pending();
        match pending.as_ref() {
            Some(entries) => f(entries),
            // Frozen between the first check and taking the lock.
            None => match self.frozen.get() {
                Some(entries) => f(entries),
                None => f(&Entries::new()),
            },
        }
    }

    /// Returns a copy of the stored `(kind, timeframe)` variant.
    ///
    /// # Errors
    ///
    /// `NotConfigured` if no variant was registered. The baseline is never
    /// returned in its place.
    pub fn resolve(&self, kind: RecordKind, timeframe: Timeframe) -> Result<Record> {
        self.with_entries(|entries| entries.get(&(kind, timeframe)).cloned())
            .ok_or(ConfigError::NotConfigured { kind, timeframe })
    }

    /// Typed form of [`ConfigRegistry::resolve`].
    pub fn resolve_as<P: ParamSet>(&self, timeframe: Timeframe) -> Result<P> {
        self.resolve(P::KIND, timeframe).and_then(|record| {
            P::from_record(record).ok_or(ConfigError::NotConfigured {
                kind: P::KIND,
                timeframe,
            })
        })
    }

    pub fn resolve_indicator(&self, timeframe: Timeframe) -> Result<IndicatorParams> {
        self.resolve_as(timeframe)
    }

    pub fn resolve_strategy(&self, timeframe: Timeframe) -> Result<StrategyParams> {
        self.resolve_as(timeframe)
    }

    /// Registered timeframes for `kind`, in ascending order.
    pub fn timeframes(&self, kind: RecordKind) -> Vec<Timeframe> {
        let mut timeframes: Vec<Timeframe> = self.with_entries(|entries| {
            entries
                .keys()
                .filter(|(k, _)| *k == kind)
                .map(|(_, tf)| *tf)
                .collect()
        });
        timeframes.sort();
        timeframes
    }

    pub fn len(&self) -> usize {
        self.with_entries(HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}
