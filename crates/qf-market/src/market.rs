//! The named market registry.
//!
//! A [`Market`] is an explicit context object owning the named stores of
//! yield curves and volatility structures. Pricing calls take a `&Market`
//! rather than consulting hidden process-wide state, which makes
//! concurrent use safe by construction: the registries sit behind
//! read-write locks, stored objects are immutable behind `Arc`, and a
//! query can never observe a partially constructed curve.
//!
//! `insert` replaces any existing object of the same name, matching the
//! reconstruct-to-overwrite lifecycle of curve objects.

use crate::volatility::VolatilityTermStructure;
use crate::yield_curve::YieldCurve;
use qf_core::errors::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Named stores of market objects.
#[derive(Debug, Default)]
pub struct Market {
    yield_curves: RwLock<HashMap<String, Arc<YieldCurve>>>,
    volatilities: RwLock<HashMap<String, Arc<VolatilityTermStructure>>>,
}

/// A listing of the registry contents, names sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketContents {
    /// Names of the registered yield curves.
    pub yield_curves: Vec<String>,
    /// Names of the registered volatility term structures.
    pub volatilities: Vec<String>,
}

impl Market {
    /// Create an empty market.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a yield curve under `name`, returning the
    /// stored handle.
    pub fn insert_yield_curve(&self, name: &str, curve: YieldCurve) -> Arc<YieldCurve> {
        let handle = Arc::new(curve);
        self.yield_curves
            .write()
            .expect("market lock poisoned")
            .insert(name.to_string(), Arc::clone(&handle));
        handle
    }

    /// Look up a yield curve by name.
    pub fn yield_curve(&self, name: &str) -> Result<Arc<YieldCurve>> {
        self.yield_curves
            .read()
            .expect("market lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("yield curve {name}")))
    }

    /// Remove a yield curve by name. Returns `true` if one was present.
    pub fn remove_yield_curve(&self, name: &str) -> bool {
        self.yield_curves
            .write()
            .expect("market lock poisoned")
            .remove(name)
            .is_some()
    }

    /// Insert (or replace) a volatility term structure under `name`,
    /// returning the stored handle.
    pub fn insert_volatility(
        &self,
        name: &str,
        vol: VolatilityTermStructure,
    ) -> Arc<VolatilityTermStructure> {
        let handle = Arc::new(vol);
        self.volatilities
            .write()
            .expect("market lock poisoned")
            .insert(name.to_string(), Arc::clone(&handle));
        handle
    }

    /// Look up a volatility term structure by name.
    pub fn volatility(&self, name: &str) -> Result<Arc<VolatilityTermStructure>> {
        self.volatilities
            .read()
            .expect("market lock poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("volatility curve {name}")))
    }

    /// Remove a volatility term structure by name. Returns `true` if one
    /// was present.
    pub fn remove_volatility(&self, name: &str) -> bool {
        self.volatilities
            .write()
            .expect("market lock poisoned")
            .remove(name)
            .is_some()
    }

    /// List the registry contents.
    pub fn contents(&self) -> MarketContents {
        let mut yield_curves: Vec<String> = self
            .yield_curves
            .read()
            .expect("market lock poisoned")
            .keys()
            .cloned()
            .collect();
        yield_curves.sort();
        let mut volatilities: Vec<String> = self
            .volatilities
            .read()
            .expect("market lock poisoned")
            .keys()
            .cloned()
            .collect();
        volatilities.sort();
        MarketContents {
            yield_curves,
            volatilities,
        }
    }

    /// Remove every registered object.
    pub fn clear(&self) {
        self.yield_curves.write().expect("market lock poisoned").clear();
        self.volatilities.write().expect("market lock poisoned").clear();
    }
}
