//! Sequential (venue, year) enumeration driving fetch → cite → rank.

use std::sync::Arc;

use crate::citations::{CitationFetcher, paper_id};
use crate::metadata::MetadataFetcher;
use crate::rank;
use crate::store::CacheStore;
use crate::venue::Venue;
use crate::CoreError;

pub struct Orchestrator {
    metadata: MetadataFetcher,
    citations: CitationFetcher,
    ranks: Arc<dyn CacheStore>,
}

/// Outcome of one (venue, year) unit of work.
#[derive(Debug, Clone)]
pub struct UnitSummary {
    pub venue: Venue,
    pub container_title: String,
    pub year: i32,
    pub papers: usize,
    pub artifact: String,
}

impl Orchestrator {
    pub fn new(
        metadata: MetadataFetcher,
        citations: CitationFetcher,
        ranks: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            metadata,
            citations,
            ranks,
        }
    }

    /// Produce one ranking artifact per (venue, year) across the year range.
    ///
    /// Fully sequential: a unit completes before the next starts, so a
    /// restart resumes from the cache without re-querying completed work.
    pub async fn collect(
        &self,
        from_year: i32,
        until_year: i32,
    ) -> Result<Vec<UnitSummary>, CoreError> {
        let mut summaries = Vec::new();
        let mut seq = 0usize;
        for year in from_year..=until_year {
            for venue in Venue::ALL {
                seq += 1;
                summaries.push(self.run_unit(venue, year, seq).await?);
            }
        }
        Ok(summaries)
    }

    /// One unit of work: metadata, then a citation per paper, then the
    /// ranking artifact.
    ///
    /// An empty ranking for the alias-resolved venue is fatal. The artifact
    /// is still written, but the run stops: the title mapping or the
    /// filtering has drifted.
    pub async fn run_unit(
        &self,
        venue: Venue,
        year: i32,
        seq: usize,
    ) -> Result<UnitSummary, CoreError> {
        let container_title = venue.container_title(year).to_string();
        let mut papers = self.metadata.fetch_papers(venue, year).await?;
        for paper in &mut papers {
            let citation = self.citations.fetch(&paper_id(&paper.doi)).await?;
            paper.citations = Some(citation);
        }

        let entries = rank::rank(papers);
        let artifact = rank::artifact_name(seq, &container_title, year);
        rank::write_ranking(self.ranks.as_ref(), &artifact, &entries)?;

        if entries.is_empty() && venue.year_dependent() {
            return Err(CoreError::EmptyVenue {
                venue: container_title,
                year,
            });
        }

        tracing::info!(
            venue = %container_title,
            year,
            papers = entries.len(),
            artifact = %artifact,
            "unit complete"
        );
        Ok(UnitSummary {
            venue,
            container_title,
            year,
            papers: entries.len(),
            artifact,
        })
    }
}
