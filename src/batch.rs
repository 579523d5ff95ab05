//! Group-wise evaluation helper.
//!
//! Groups are independent, so they can be evaluated in any order. With the
//! `parallel` feature the work is spread over the rayon thread pool; results
//! are collected into an ordered map either way, so output does not depend
//! on evaluation order.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Apply `f` to every entry of `groups`, keeping the key order.
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_groups<K, V, R, F>(groups: &BTreeMap<K, V>, f: F) -> BTreeMap<K, R>
where
    K: Ord + Clone + Sync + Send,
    V: Sync,
    R: Send,
    F: Fn(&K, &V) -> R + Sync,
{
    groups.iter().map(|(k, v)| (k.clone(), f(k, v))).collect()
}

/// Apply `f` to every entry of `groups` in parallel, keeping the key order.
#[cfg(feature = "parallel")]
pub(crate) fn map_groups<K, V, R, F>(groups: &BTreeMap<K, V>, f: F) -> BTreeMap<K, R>
where
    K: Ord + Clone + Sync + Send,
    V: Sync,
    R: Send,
    F: Fn(&K, &V) -> R + Sync,
{
    let entries: Vec<(&K, &V)> = groups.iter().collect();
    let results: Vec<(K, R)> = entries
        .par_iter()
        .map(|&(k, v)| (k.clone(), f(k, v)))
        .collect();
    results.into_iter().collect()
}
