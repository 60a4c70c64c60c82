use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use calmly_core::{
    Classification, Classifier, Journal, MemoryStateStore, NoteCategory, NoteService,
};
use parking_lot::Mutex;
use tokio::sync::Semaphore;

/// Test double returning a scripted outcome per note content, optionally
/// held behind a gate so the test controls completion order.
#[derive(Default)]
struct StubClassifier {
    responses: Mutex<HashMap<String, Option<Classification>>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl StubClassifier {
    fn respond(&self, content: &str, outcome: Option<Classification>) {
        self.responses.lock().insert(content.to_string(), outcome);
    }

    /// Holds classification of `content` until a permit is released.
    fn gate(&self, content: &str) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates.lock().insert(content.to_string(), gate.clone());
        gate
    }
}

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(&self, content: &str) -> Option<Classification> {
        let gate = self.gates.lock().get(content).cloned();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        self.responses.lock().get(content).cloned().flatten()
    }
}

fn dream() -> Classification {
    Classification {
        category: NoteCategory::Dream,
        summary: "A soft little dream.".to_string(),
    }
}

fn idea() -> Classification {
    Classification {
        category: NoteCategory::Idea,
        summary: "A gentle spark worth keeping.".to_string(),
    }
}

fn service_over(
    store: MemoryStateStore,
    classifier: Arc<StubClassifier>,
) -> NoteService<MemoryStateStore, StubClassifier> {
    NoteService::new(Journal::load(store).into_shared(), classifier)
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn add_returns_a_visible_placeholder_before_enrichment_resolves() {
    let classifier = Arc::new(StubClassifier::default());
    let content = "I want to open a tiny studio by the sea";
    let gate = classifier.gate(content);
    classifier.respond(content, Some(dream()));
    let service = service_over(MemoryStateStore::new(), classifier);

    let id = service.add(content).unwrap().unwrap();

    // visible immediately, still unsorted, marked pending
    let listed = service.list(None);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].category, NoteCategory::Unsorted);
    assert!(listed[0].summary.is_none());
    assert_eq!(service.pending_ids(), vec![id]);

    gate.add_permits(1);
    wait_until(|| service.list(None)[0].is_classified()).await;

    let note = &service.list(None)[0];
    assert_eq!(note.category, NoteCategory::Dream);
    assert_eq!(note.summary.as_deref(), Some("A soft little dream."));
    assert!(service.pending_ids().is_empty());
}

#[tokio::test]
async fn enrichment_patches_by_id_despite_interleaved_changes() {
    let classifier = Arc::new(StubClassifier::default());
    let slow = "slow note waiting on the service";
    let gate = classifier.gate(slow);
    classifier.respond(slow, Some(dream()));
    classifier.respond("a fresh unrelated spark", Some(idea()));
    let service = service_over(MemoryStateStore::new(), classifier);

    let slow_id = service.add(slow).unwrap().unwrap();
    let doomed_id = service.add("doomed note").unwrap().unwrap();
    let fresh_id = service.add("a fresh unrelated spark").unwrap().unwrap();

    // churn the list while the slow classification is still in flight
    assert!(service.delete(doomed_id).unwrap());
    wait_until(|| {
        service
            .list(None)
            .iter()
            .find(|n| n.id == fresh_id)
            .is_some_and(|n| n.is_classified())
    })
    .await;

    gate.add_permits(1);
    wait_until(|| {
        service
            .list(None)
            .iter()
            .find(|n| n.id == slow_id)
            .is_some_and(|n| n.is_classified())
    })
    .await;

    let notes = service.list(None);
    assert_eq!(notes.len(), 2);
    // reverse-creation order is preserved through patches
    assert_eq!(notes[0].id, fresh_id);
    assert_eq!(notes[1].id, slow_id);
    assert_eq!(notes[0].category, NoteCategory::Idea);
    assert_eq!(notes[1].category, NoteCategory::Dream);
}

#[tokio::test]
async fn failed_classification_leaves_the_placeholder_forever() {
    let classifier = Arc::new(StubClassifier::default());
    let service = service_over(MemoryStateStore::new(), classifier);

    // no scripted response: the classifier resolves to no-result
    let id = service.add("a note the service cannot place").unwrap().unwrap();
    wait_until(|| service.pending_ids().is_empty()).await;

    let note = &service.list(None)[0];
    assert_eq!(note.id, id);
    assert_eq!(note.category, NoteCategory::Unsorted);
    assert!(note.summary.is_none());
}

#[tokio::test]
async fn blank_submission_is_a_silent_noop() {
    let classifier = Arc::new(StubClassifier::default());
    let service = service_over(MemoryStateStore::new(), classifier);

    assert!(service.add("").unwrap().is_none());
    assert!(service.add("   \n ").unwrap().is_none());
    assert!(service.list(None).is_empty());
    assert!(service.pending_ids().is_empty());
}

#[tokio::test]
async fn deleting_a_note_mid_flight_discards_the_result() {
    let classifier = Arc::new(StubClassifier::default());
    let content = "soon to be deleted";
    let gate = classifier.gate(content);
    classifier.respond(content, Some(dream()));
    let service = service_over(MemoryStateStore::new(), classifier);

    let id = service.add(content).unwrap().unwrap();
    assert!(service.delete(id).unwrap());
    assert!(service.pending_ids().is_empty());

    gate.add_permits(1);
    settle().await;

    // the late result must not resurrect the note
    assert!(service.list(None).is_empty());
    assert!(service.pending_ids().is_empty());
}

#[tokio::test]
async fn reclassify_retries_a_note_left_unsorted() {
    let classifier = Arc::new(StubClassifier::default());
    let content = "second chance note";
    let service = service_over(MemoryStateStore::new(), Arc::clone(&classifier));

    // first round resolves to no-result
    let id = service.add(content).unwrap().unwrap();
    wait_until(|| service.pending_ids().is_empty()).await;
    assert_eq!(service.list(None)[0].category, NoteCategory::Unsorted);

    // second round succeeds
    classifier.respond(content, Some(idea()));
    assert!(service.reclassify(id));
    wait_until(|| service.list(None)[0].is_classified()).await;
    assert_eq!(service.list(None)[0].category, NoteCategory::Idea);

    // unknown ids are rejected without spawning anything
    assert!(!service.reclassify(uuid::Uuid::now_v7()));
}

#[tokio::test]
async fn enrichment_results_are_persisted_through_the_store() {
    let classifier = Arc::new(StubClassifier::default());
    let content = "remember this one";
    classifier.respond(content, Some(dream()));
    let store = MemoryStateStore::new();
    let service = service_over(store.clone(), classifier);

    service.add(content).unwrap().unwrap();
    wait_until(|| service.list(None)[0].is_classified()).await;

    let reloaded = Journal::load(store);
    let notes = reloaded.notes(None);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].category, NoteCategory::Dream);
    assert_eq!(notes[0].summary.as_deref(), Some("A soft little dream."));
    // pending markers are session state and never persist
    assert!(reloaded.pending_note_ids().is_empty());
}

#[tokio::test]
async fn list_filters_case_insensitively_over_content_and_summary() {
    let classifier = Arc::new(StubClassifier::default());
    let content = "Morning pages about the garden";
    classifier.respond(content, Some(dream()));
    let service = service_over(MemoryStateStore::new(), classifier);

    service.add(content).unwrap().unwrap();
    service.add("grocery list").unwrap().unwrap();
    wait_until(|| service.list(None).iter().any(|n| n.is_classified())).await;

    assert_eq!(service.list(Some("GARDEN")).len(), 1);
    // summary text is searchable once enrichment lands
    assert_eq!(service.list(Some("soft little")).len(), 1);
    assert_eq!(service.list(Some("nowhere")).len(), 0);
    assert_eq!(service.list(Some("")).len(), 2);
}
