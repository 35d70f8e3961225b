use super::types::{Dataset, RankedEntry};
use crate::records::types::{Record, value_text};
use serde_json::Value;

/// Ranks `records` by `score_field` and keeps the best `k`.
///
/// Records without the field are skipped. Ordering follows
/// [`partition_sort`] reversed, so equal scores come out in reverse input
/// order. An empty input or `k == 0` gives an empty dataset.
pub fn top_k(records: &[Record], score_field: &str, k: usize) -> Dataset {
    let eligible: Vec<RankedEntry> = records
        .iter()
        .filter_map(|record| match record.get(score_field) {
            Some(value) => Some(RankedEntry {
                identifier: record.identifier().unwrap_or_default(),
                score: coerce_score(value),
            }),
            None => {
                tracing::debug!(
                    "Skipping {} {:?}: no `{}` attribute",
                    record.kind(),
                    record.identifier(),
                    score_field
                );
                None
            }
        })
        .collect();

    let target = k.min(eligible.len());
    if target == 0 {
        return Vec::new();
    }

    let mut ranked = partition_sort(eligible, |entry| entry.score);
    ranked.reverse();
    ranked.truncate(target);
    ranked
}

/// Numeric value of a score attribute.
///
/// Strings are trimmed and parsed (blank means 0), booleans count as 1/0 and
/// null as 0. Anything unparseable becomes NaN.
pub fn coerce_score(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => {
            tracing::debug!("Non-scalar score {}", value_text(value));
            f64::NAN
        }
    }
}

/// NaN ranks below every real number; two NaNs tie.
fn is_less(score: f64, pivot: f64) -> bool {
    match (score.is_nan(), pivot.is_nan()) {
        (true, false) => true,
        (false, false) => score < pivot,
        _ => false,
    }
}

enum Work<T> {
    Sort(Vec<T>),
    Emit(T),
}

/// Ascending two-way partition sort.
///
/// The first element of each partition is the pivot; the rest is split into
/// "strictly less than the pivot" and "greater or equal", and the result is
/// `less ++ [pivot] ++ greater_or_equal`. Ties therefore keep their input
/// order and all land after the pivot.
///
/// Runs on an explicit work stack; the output is the same as the recursive
/// formulation.
pub fn partition_sort<T, F>(items: Vec<T>, score: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut sorted = Vec::with_capacity(items.len());
    let mut stack = vec![Work::Sort(items)];

    while let Some(work) = stack.pop() {
        match work {
            Work::Emit(item) => sorted.push(item),
            Work::Sort(partition) => {
                if partition.len() <= 1 {
                    sorted.extend(partition);
                    continue;
                }

                let mut rest = partition.into_iter();
                let Some(pivot) = rest.next() else {
                    continue;
                };
                let pivot_score = score(&pivot);
                let (less, greater_or_equal): (Vec<T>, Vec<T>) =
                    rest.partition(|item| is_less(score(item), pivot_score));

                // popped in reverse: less, pivot, greater_or_equal
                stack.push(Work::Sort(greater_or_equal));
                stack.push(Work::Emit(pivot));
                stack.push(Work::Sort(less));
            }
        }
    }

    sorted
}
