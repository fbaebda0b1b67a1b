//! Annotated sample batch persisted twice: second run updates, never duplicates.

use xylomyx_annotate::AnnotationPipeline;
use xylomyx_common::{CandidateBatch, DiscoveryProfile};
use xylomyx_db::{BatchUpsertResult, CandidateQuery, CandidateStore, InMemoryCandidateStore};
use xylomyx_test_utils::{assert_eq, sample_batch};

#[tokio::test]
async fn rerun_updates_existing_accessions() {
    let pipeline = AnnotationPipeline::new(&DiscoveryProfile::default()).unwrap();
    let report = pipeline.run(CandidateBatch::from_raw(sample_batch())).unwrap();
    let store = InMemoryCandidateStore::new();

    let first = store.upsert_batch(&report.candidates).await.unwrap();
    assert_eq!(first, BatchUpsertResult { inserted: 7, updated: 0 });

    let second = store.upsert_batch(&report.candidates).await.unwrap();
    assert_eq!(second, BatchUpsertResult { inserted: 0, updated: 7 });
    assert_eq!(store.count().await.unwrap(), 7);

    let cellulases = store.query(&CandidateQuery::new().enzyme_type("cellulase")).await.unwrap();
    assert!(cellulases.iter().any(|r| r.accession == "XP_018320001"));
    for pair in cellulases.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }

    let stats = store.statistics().await.unwrap();
    assert_eq!(stats.total_candidates, 7);
    assert_eq!(stats.top_organisms[0].1, 7);
}
