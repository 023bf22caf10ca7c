//! Integration tests for the document store: fetches, the two-step upload
//! with progress tracking, delete refetch and per-document access grants.

mod common;

use std::time::Duration;

use chrono::{TimeZone, Utc};
use client::flash::FlashKind;
use client::store::DocumentStore;
use common::*;
use pretty_assertions::assert_eq;
use shared_types::{
    AppError, DocumentAction, DocumentLog, DocumentPermissions, MutationAck, ParticipantRole,
};

fn store_with(
    api: &FakeDocumentApi,
    blob: &FakeBlobStore,
) -> (DocumentStore<FakeDocumentApi, FakeBlobStore>, client::FlashRelay) {
    let (session, flash) = harness();
    (
        DocumentStore::new(api.clone(), blob.clone(), session, flash.clone()),
        flash,
    )
}

fn log_at(hour: u32, action: DocumentAction) -> DocumentLog {
    DocumentLog {
        action,
        user_wallet: wallet(LAWYER),
        user_role: ParticipantRole::Lawyer,
        timestamp: Utc.with_ymd_and_hms(2026, 2, 11, hour, 0, 0).unwrap(),
        notes: None,
    }
}

#[tokio::test]
async fn fetch_case_documents_replaces_and_scopes_the_collection() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    api.script_list(Ok(vec![make_document("d1", "c1", LAWYER)]));
    let (store, _flash) = store_with(&api, &blob);

    let docs = store.fetch_case_documents("c1").await;

    assert_eq!(docs.len(), 1);
    let state = store.snapshot();
    assert_eq!(state.documents[0].id, "d1");
    assert_eq!(state.case_scope.as_deref(), Some("c1"));
    assert!(!state.loading);
}

#[tokio::test]
async fn unauthenticated_fetch_is_a_noop() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    let store = DocumentStore::new(
        api.clone(),
        blob,
        client::Session::new(),
        client::FlashRelay::new(),
    );

    let docs = store.fetch_case_documents("c1").await;

    assert!(docs.is_empty());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn document_logs_are_sorted_newest_first() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    api.script_logs(Ok(vec![
        log_at(9, DocumentAction::Uploaded),
        log_at(14, DocumentAction::Shared),
        log_at(11, DocumentAction::Viewed),
    ]));
    let (store, _flash) = store_with(&api, &blob);

    let logs = store.fetch_document_logs("d1").await;

    let actions: Vec<_> = logs.iter().map(|l| l.action).collect();
    assert_eq!(
        actions,
        vec![
            DocumentAction::Shared,
            DocumentAction::Viewed,
            DocumentAction::Uploaded,
        ]
    );
    assert_eq!(store.snapshot().document_logs, logs);
}

#[tokio::test(start_paused = true)]
async fn upload_pins_registers_and_refetches() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    blob.script_upload(Ok(FakeBlobStore::receipt("bafy-new")));
    api.script_ack(Ok(MutationAck::default()));
    api.script_list(Ok(vec![make_document("d1", "c1", ADMIN)]));
    let (store, flash) = store_with(&api, &blob);

    let file = pdf_file("deposition.pdf", 4096);
    store
        .upload_document("c1", "Deposition transcript", file, vec![])
        .await
        .unwrap();

    // Metadata registration carried the CID and size from the pin step.
    let uploads = api.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].ipfs_cid, "bafy-new");
    assert_eq!(uploads[0].file_size, 4096);
    assert_eq!(uploads[0].title, "Deposition transcript");

    assert_eq!(store.documents().len(), 1);
    assert_eq!(store.upload_progress(), 100);
    assert_eq!(
        flash.current().unwrap().text,
        "Document uploaded successfully"
    );

    // Progress snaps back to zero shortly after completion.
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(store.upload_progress(), 0);
}

#[tokio::test(start_paused = true)]
async fn upload_metadata_failure_leaves_documents_untouched() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    // Pin succeeds, registration fails.
    blob.script_upload(Ok(FakeBlobStore::receipt("bafy-orphan")));
    api.script_ack(Err(AppError::forbidden("Upload not permitted")));
    let (store, flash) = store_with(&api, &blob);

    let err = store
        .upload_document("c1", "Exhibit", pdf_file("exhibit.pdf", 100), vec![])
        .await
        .unwrap_err();

    assert_eq!(err.message, "Upload not permitted");
    assert!(store.documents().is_empty());
    assert!(store.error().is_some());
    assert_eq!(flash.current().unwrap().text, "Upload not permitted");
    // The failed mutation must not trigger a list refetch.
    assert_eq!(api.calls(), vec!["upload_document:c1".to_string()]);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(store.upload_progress(), 0);
}

#[tokio::test(start_paused = true)]
async fn upload_blob_failure_uses_fallback_message() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    blob.script_upload(Err(AppError::transport("gateway unreachable")));
    let (store, flash) = store_with(&api, &blob);

    let result = store
        .upload_document("c1", "Exhibit", pdf_file("exhibit.pdf", 100), vec![])
        .await;

    assert!(result.is_err());
    assert_eq!(flash.current().unwrap().text, "Failed to upload document");
    // The metadata step never ran.
    assert!(api.uploads().is_empty());
}

#[tokio::test]
async fn empty_title_defaults_to_the_file_name() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    blob.script_upload(Ok(FakeBlobStore::receipt("bafy-1")));
    api.script_ack(Ok(MutationAck::default()));
    let (store, _flash) = store_with(&api, &blob);

    store
        .upload_document("c1", "  ", pdf_file("scan-001.pdf", 10), vec![])
        .await
        .unwrap();

    assert_eq!(api.uploads()[0].title, "scan-001.pdf");
}

#[tokio::test]
async fn delete_refetches_the_owning_case_documents() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    api.script_list(Ok(vec![make_document("d1", "c1", ADMIN)]));
    let (store, flash) = store_with(&api, &blob);
    store.fetch_case_documents("c1").await;

    api.script_ack(Ok(MutationAck::default()));
    api.script_list(Ok(vec![]));

    store.delete_document("d1").await.unwrap();

    assert!(store.documents().is_empty());
    assert_eq!(
        flash.current().unwrap().text,
        "Document deleted successfully"
    );
    assert_eq!(
        api.calls(),
        vec![
            "list_documents:c1".to_string(),
            "delete_document:d1".to_string(),
            "list_documents:c1".to_string(),
        ]
    );
}

#[tokio::test]
async fn document_access_grant_does_not_refetch() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    api.script_ack(Ok(MutationAck::default()));
    let (store, flash) = store_with(&api, &blob);

    store
        .grant_document_access(
            "d1",
            &wallet(OTHER),
            DocumentPermissions {
                can_view: true,
                can_delete: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(flash.current().unwrap().text, "Access granted successfully");
    assert_eq!(api.calls(), vec![format!("grant_access:d1:{}", OTHER)]);
}

#[tokio::test]
async fn revoke_document_access_surfaces_errors() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    api.script_ack(Err(AppError::not_found("No access entry for wallet")));
    let (store, flash) = store_with(&api, &blob);

    let err = store
        .revoke_document_access(
            "d1",
            &wallet(OTHER),
            DocumentPermissions {
                can_view: true,
                can_delete: false,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.message, "No access entry for wallet");
    let msg = flash.current().unwrap();
    assert_eq!(msg.kind, FlashKind::Error);
    assert_eq!(msg.text, "No access entry for wallet");
}

#[tokio::test]
async fn download_url_comes_from_the_gateway() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    let (store, _flash) = store_with(&api, &blob);

    assert_eq!(
        store.download_url("bafy-1"),
        "https://gateway.test/ipfs/bafy-1"
    );
}

#[tokio::test(start_paused = true)]
async fn overlapping_document_fetches_discard_the_stale_response() {
    let api = FakeDocumentApi::default();
    let blob = FakeBlobStore::default();
    api.script_list_delayed(
        Duration::from_millis(80),
        Ok(vec![make_document("stale", "c1", ADMIN)]),
    );
    api.script_list_delayed(
        Duration::from_millis(10),
        Ok(vec![make_document("fresh", "c1", ADMIN)]),
    );
    let (store, _flash) = store_with(&api, &blob);

    tokio::join!(
        store.fetch_case_documents("c1"),
        store.fetch_case_documents("c1")
    );

    let docs = store.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "fresh");
}
