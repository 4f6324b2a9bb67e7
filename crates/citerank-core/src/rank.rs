//! Citation-count ranking and artifact persistence.

use std::cmp::Reverse;

use crate::store::{CacheStore, StoreError};
use crate::{CoreError, Paper, RankEntry};

/// Sort papers by citation count descending and assign 1-based ranks.
///
/// The sort is stable: ties keep the input order, so a deterministic input
/// yields a deterministic ranking.
pub fn rank(mut papers: Vec<Paper>) -> Vec<RankEntry> {
    papers.sort_by_key(|p| Reverse(citation_count(p)));
    papers
        .into_iter()
        .enumerate()
        .map(|(i, paper)| RankEntry { rank: i + 1, paper })
        .collect()
}

fn citation_count(paper: &Paper) -> u64 {
    paper
        .citations
        .as_ref()
        .map(|c| c.citation_count)
        .unwrap_or(0)
}

/// Artifact name for one (venue, year) ranking: zero-padded sequence number,
/// venue title, year, with spaces replaced so artifacts sort lexically in
/// production order.
pub fn artifact_name(seq: usize, container_title: &str, year: i32) -> String {
    format!("{:03} {} {}", seq, container_title, year).replace(' ', "-")
}

/// Persist a ranked list under the given artifact name.
pub fn write_ranking(
    store: &dyn CacheStore,
    name: &str,
    entries: &[RankEntry],
) -> Result<(), CoreError> {
    store.put(name, &serde_json::to_value(entries).map_err(StoreError::from)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::Citation;

    fn paper(title: &str, count: u64) -> Paper {
        Paper {
            title: title.to_string(),
            authors: vec![],
            doi: format!("10.1/{}", title),
            venue: "International Conference on Software Engineering".to_string(),
            citations: Some(Citation {
                citation_count: count,
                source: "semanticscholar".to_string(),
            }),
            year: 2022,
        }
    }

    #[test]
    fn ranking_is_stable_and_descending() {
        let papers = vec![
            paper("first-five", 5),
            paper("second-five", 5),
            paper("ten", 10),
            paper("zero", 0),
        ];
        let entries = rank(papers);
        let order: Vec<(usize, &str, u64)> = entries
            .iter()
            .map(|e| {
                (
                    e.rank,
                    e.paper.title.as_str(),
                    e.paper.citations.as_ref().unwrap().citation_count,
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "ten", 10),
                (2, "first-five", 5),
                (3, "second-five", 5),
                (4, "zero", 0),
            ]
        );
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        assert!(rank(vec![]).is_empty());
    }

    #[test]
    fn stub_without_citations_counts_as_zero() {
        let mut stub = paper("stub", 0);
        stub.citations = None;
        let entries = rank(vec![stub, paper("cited", 3)]);
        assert_eq!(entries[0].paper.title, "cited");
        assert_eq!(entries[1].paper.title, "stub");
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn artifact_name_is_zero_padded_and_separator_joined() {
        assert_eq!(
            artifact_name(1, "International Conference on Software Engineering", 2013),
            "001-International-Conference-on-Software-Engineering-2013"
        );
        assert_eq!(
            artifact_name(42, "Journal of Systems and Software", 2020),
            "042-Journal-of-Systems-and-Software-2020"
        );
        assert_eq!(artifact_name(100, "X", 2023), "100-X-2023");
    }

    #[test]
    fn ranking_artifact_roundtrips_through_store() {
        let store = MemoryStore::new();
        let entries = rank(vec![paper("a", 2), paper("b", 9)]);
        write_ranking(&store, "001-Test-2022", &entries).unwrap();
        let doc = store.get("001-Test-2022").unwrap().unwrap();
        let read: Vec<RankEntry> = serde_json::from_value(doc).unwrap();
        assert_eq!(read, entries);
        assert_eq!(read[0].paper.title, "b");
    }
}
