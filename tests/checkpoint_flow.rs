//! End-to-end checkpoint persistence tests over the in-memory object store.
//!
//! These cover the full remote lifecycle of a named checkpoint: first-run
//! load, progress saves, concurrent-writer conflicts, deletion, and
//! enumeration.

use indexer_checkpoint::{
    BlockHash, BlockLocator, Checkpoint, CheckpointError, InMemoryObjectStore, Network,
    ObjectStore,
};
use std::sync::Arc;

fn hash(byte: u8) -> BlockHash {
    BlockHash::new([byte; 32])
}

fn network() -> Network {
    Network::new("test", hash(0xAA))
}

fn store() -> Arc<InMemoryObjectStore> {
    Arc::new(InMemoryObjectStore::new())
}

#[tokio::test]
async fn first_load_starts_at_genesis() {
    let network = network();
    let checkpoint = Checkpoint::load("wallet-scan", &network, store())
        .await
        .unwrap();

    assert_eq!(checkpoint.name(), "wallet-scan");
    assert_eq!(
        checkpoint.locator(),
        &BlockLocator::genesis_only(network.genesis())
    );
}

#[tokio::test]
async fn load_rejects_empty_name() {
    let result = Checkpoint::load("", &network(), store()).await;
    assert!(matches!(
        result,
        Err(CheckpointError::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn saved_progress_survives_reload() {
    let network = network();
    let store = store();

    let mut checkpoint = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    let locator = BlockLocator::new(vec![hash(1), network.genesis()]).unwrap();
    assert!(checkpoint.save_progress(locator.clone()).await.unwrap());

    let reloaded = Checkpoint::load("wallet-scan", &network, store)
        .await
        .unwrap();
    assert_eq!(reloaded.locator(), &locator);
}

#[tokio::test]
async fn sequential_saves_on_one_instance_both_succeed() {
    let network = network();
    let store = store();

    let mut checkpoint = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    let first = BlockLocator::new(vec![hash(1), network.genesis()]).unwrap();
    let second = BlockLocator::new(vec![hash(2), hash(1), network.genesis()]).unwrap();

    assert!(checkpoint.save_progress(first).await.unwrap());
    assert!(checkpoint.save_progress(second.clone()).await.unwrap());
    assert_eq!(checkpoint.locator(), &second);

    let key = network.checkpoint_key("wallet-scan");
    let stored = store.fetch(&key).await.unwrap().unwrap();
    assert_eq!(stored.bytes, second.to_bytes());
}

#[tokio::test]
async fn stale_writer_reports_conflict_and_does_not_overwrite() {
    let network = network();
    let store = store();

    // Both instances observe the same initial revision.
    let mut writer_a = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    let seed = BlockLocator::new(vec![hash(1), network.genesis()]).unwrap();
    assert!(writer_a.save_progress(seed).await.unwrap());

    let mut writer_b = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();

    // A moves the object; B's tag is now stale.
    let from_a = BlockLocator::new(vec![hash(2), hash(1), network.genesis()]).unwrap();
    assert!(writer_a.save_progress(from_a.clone()).await.unwrap());

    let from_b = BlockLocator::new(vec![hash(9), hash(1), network.genesis()]).unwrap();
    let saved = writer_b.save_progress(from_b.clone()).await.unwrap();
    assert!(!saved);

    // B's in-memory state is untouched by the lost race.
    assert_ne!(writer_b.locator(), &from_b);

    // The remote object still holds A's payload.
    let key = network.checkpoint_key("wallet-scan");
    let stored = store.fetch(&key).await.unwrap().unwrap();
    assert_eq!(stored.bytes, from_a.to_bytes());

    // After reloading, B can save again.
    let mut writer_b = Checkpoint::load("wallet-scan", &network, store).await.unwrap();
    assert!(writer_b.save_progress(from_b).await.unwrap());
}

#[tokio::test]
async fn wallet_scan_scenario() {
    // name="wallet-scan", fallback id G; no remote object -> load yields [G];
    // save [G, B1] succeeds; a second loader with the now-stale tag fails to
    // save [G, B1, B2] and the remote object keeps [G, B1].
    let g = hash(0xAA);
    let b1 = hash(0xB1);
    let b2 = hash(0xB2);
    let network = Network::new("main", g);
    let store = store();

    let mut checkpoint = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    assert_eq!(checkpoint.locator().blocks(), &[g]);

    // Seed the remote object so both loaders observe a version tag.
    assert!(checkpoint
        .save_progress(BlockLocator::new(vec![g]).unwrap())
        .await
        .unwrap());

    let mut stale_loader = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();

    let progress = BlockLocator::new(vec![g, b1]).unwrap();
    assert!(checkpoint.save_progress(progress.clone()).await.unwrap());

    let conflicting = BlockLocator::new(vec![g, b1, b2]).unwrap();
    assert!(!stale_loader.save_progress(conflicting).await.unwrap());

    let key = network.checkpoint_key("wallet-scan");
    let stored = store.fetch(&key).await.unwrap().unwrap();
    assert_eq!(stored.bytes, progress.to_bytes());
}

#[tokio::test]
async fn delete_is_idempotent_even_when_never_saved() {
    let network = network();
    let store = store();

    let checkpoint = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    checkpoint.delete().await.unwrap();
    checkpoint.delete().await.unwrap();

    let mut saved = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    assert!(saved
        .save_progress(BlockLocator::new(vec![hash(1), network.genesis()]).unwrap())
        .await
        .unwrap());
    saved.delete().await.unwrap();
    saved.delete().await.unwrap();

    let key = network.checkpoint_key("wallet-scan");
    assert!(store.fetch(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn save_after_delete_requires_fresh_load() {
    let network = network();
    let store = store();

    let mut checkpoint = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    assert!(checkpoint
        .save_progress(BlockLocator::new(vec![hash(1), network.genesis()]).unwrap())
        .await
        .unwrap());
    checkpoint.delete().await.unwrap();

    // The instance is logically stale: its tag races against a nonexistent
    // object and loses.
    let saved = checkpoint
        .save_progress(BlockLocator::new(vec![hash(2), network.genesis()]).unwrap())
        .await
        .unwrap();
    assert!(!saved);
}

#[tokio::test]
async fn corrupt_remote_payload_falls_back_to_genesis() {
    let network = network();
    let store = store();
    let key = network.checkpoint_key("wallet-scan");

    store
        .conditional_write(&key, b"\x05not a locator", None)
        .await
        .unwrap();

    let checkpoint = Checkpoint::load("wallet-scan", &network, store)
        .await
        .unwrap();
    assert_eq!(
        checkpoint.locator(),
        &BlockLocator::genesis_only(network.genesis())
    );
}

#[tokio::test]
async fn corrupt_checkpoint_can_still_save_over_the_bad_payload() {
    let network = network();
    let store = store();
    let key = network.checkpoint_key("wallet-scan");

    store.conditional_write(&key, b"garbage", None).await.unwrap();

    let mut checkpoint = Checkpoint::load("wallet-scan", &network, store.clone())
        .await
        .unwrap();
    let locator = BlockLocator::new(vec![hash(1), network.genesis()]).unwrap();
    assert!(checkpoint.save_progress(locator.clone()).await.unwrap());

    let stored = store.fetch(&key).await.unwrap().unwrap();
    assert_eq!(stored.bytes, locator.to_bytes());
}

#[tokio::test]
async fn enumeration_reloads_all_checkpoints_with_names() {
    let network = network();
    let store = store();

    for (name, tip) in [("block-scan", 1u8), ("wallet-scan", 2), ("wallets/alpha", 3)] {
        let mut checkpoint = Checkpoint::load(name, &network, store.clone()).await.unwrap();
        assert!(checkpoint
            .save_progress(BlockLocator::new(vec![hash(tip), network.genesis()]).unwrap())
            .await
            .unwrap());
    }

    // A checkpoint on a different network must not appear in the listing.
    let other = Network::new("other", hash(0xBB));
    let mut foreign = Checkpoint::load("wallet-scan", &other, store.clone())
        .await
        .unwrap();
    assert!(foreign
        .save_progress(BlockLocator::new(vec![hash(9), other.genesis()]).unwrap())
        .await
        .unwrap());

    let checkpoints = Checkpoint::load_all(&network, store).await.unwrap();
    let mut names: Vec<&str> = checkpoints.iter().map(Checkpoint::name).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["block-scan", "wallet-scan", "wallets/alpha"]);

    for checkpoint in &checkpoints {
        assert_eq!(checkpoint.genesis(), hash(0xAA));
        assert_eq!(checkpoint.locator().len(), 2);
    }
}
