use std::collections::BTreeSet;

use tracing::trace;

use super::{MergeError, MergeKey, Side};

/// Merge two ordered lists into one list with at most one item per key.
///
/// Rules:
/// - both inputs absent: `None`, so callers can tell "no data" from "merged to nothing";
/// - one input absent or empty: the other input is returned as-is;
/// - otherwise every item of both lists is keyed with `key`. Secondary items whose
///   key also appears in `primary` are dropped, so the primary always wins.
///   Within one list the first occurrence of a key wins.
///
/// Output order is fixed: the surviving secondary items in their original
/// order, followed by the primary items in their original order.
///
/// `label` names the category being merged and only appears in errors and logs.
///
/// # Errors
/// [`MergeError::InvalidKey`] if `key` returns `None` or a blank key for any item
/// of a list that has to be deduplicated.
///
/// # Examples
/// ```
/// use topo_core::merge::merge_lists_dedupe;
///
/// let primary = vec![("HOST", 1), ("POD_NAME", 2)];
/// let secondary = vec![("HOST", 9), ("EXTRA", 3)];
///
/// let key = |(k, _): &(&str, i32)| Some(k.to_string());
/// let merged = merge_lists_dedupe(Some(primary), Some(secondary), key, "env")
///     .unwrap()
///     .unwrap();
/// assert_eq!(merged, vec![("EXTRA", 3), ("HOST", 1), ("POD_NAME", 2)]);
/// ```
pub fn merge_lists_dedupe<T, K, F>(
    primary: Option<Vec<T>>,
    secondary: Option<Vec<T>>,
    key: F,
    label: &str,
) -> Result<Option<Vec<T>>, MergeError>
where
    F: Fn(&T) -> Option<K>,
    K: MergeKey,
{
    let primary = match primary {
        Some(p) if !p.is_empty() => p,
        other => return Ok(secondary.or(other)),
    };
    let secondary = match secondary {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(Some(primary)),
    };

    let secondary = key_all(secondary, &key, label, Side::Secondary)?;
    let primary = key_all(primary, &key, label, Side::Primary)?;

    let mut primary_keys = BTreeSet::new();
    let mut winners = Vec::with_capacity(primary.len());
    for (k, item) in primary {
        if primary_keys.insert(k) {
            winners.push(item);
        }
    }

    let mut seen = BTreeSet::new();
    let mut merged = Vec::with_capacity(secondary.len() + winners.len());
    let mut shadowed = 0usize;
    for (k, item) in secondary {
        if primary_keys.contains(&k) {
            shadowed += 1;
            continue;
        }
        if seen.insert(k) {
            merged.push(item);
        }
    }
    merged.extend(winners);

    trace!(
        category = label,
        merged = merged.len(),
        shadowed,
        "lists merged"
    );
    Ok(Some(merged))
}

/// Pair every item with its key, failing on the first unkeyable item.
fn key_all<T, K, F>(
    items: Vec<T>,
    key: &F,
    label: &str,
    side: Side,
) -> Result<Vec<(K, T)>, MergeError>
where
    F: Fn(&T) -> Option<K>,
    K: MergeKey,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match key(&item) {
            Some(k) if !k.is_blank() => Ok((k, item)),
            _ => Err(MergeError::InvalidKey {
                label: label.to_string(),
                side,
                index,
            }),
        })
        .collect()
}
