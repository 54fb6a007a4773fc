use crate::config::Number;
use crate::record::LinkRecord;
use crate::vector_ops::euclidean_distance;

/// A retained candidate: record id plus its distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: String,
    pub distance: Number,
}

/// Score every record against the query and return the valid candidates
/// sorted ascending by distance.
///
/// Records whose stored vector is absent, unparsable, or empty are skipped,
/// as is any candidate whose distance comes back non-finite (the sentinel
/// for length mismatches and corrupt values). Equal distances keep the
/// traversal order of `records`; that order is not part of the contract.
pub fn rank(query: &[Number], records: &[LinkRecord]) -> Vec<Match> {
    let mut matches: Vec<Match> = records
        .iter()
        .filter_map(|record| {
            let vector = record.parse_vector()?;
            let distance = euclidean_distance(query, &vector);
            if distance.is_finite() {
                Some(Match {
                    id: record.id.clone(),
                    distance,
                })
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matches
}

/// Return the ids of the up-to-`k` nearest records, ascending by distance.
///
/// If `k` exceeds the number of valid candidates, every valid candidate is
/// returned; if none are valid the result is empty. The ids are meant to be
/// handed back to the store to fetch full display records.
pub fn top_k_ids(query: &[Number], records: &[LinkRecord], k: usize) -> Vec<String> {
    let mut matches = rank(query, records);
    matches.truncate(k);
    matches.into_iter().map(|m| m.id).collect()
}
