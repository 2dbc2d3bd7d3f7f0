/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use biblio_resolver::{CacheConfig, CacheGateway, FileCache};
use chrono::{Duration, Utc};
use indexmap::IndexMap;
use std::sync::Arc;

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("references.json");

    let gateway = CacheGateway::new(Arc::new(FileCache::open(&path).await.unwrap()));
    let mut batch = IndexMap::new();
    batch.insert(key("RFC2119"), short("Key words"));
    batch.insert(key("doi:10.1/x"), long("10.1/x", "A Paper"));
    assert!(gateway.add_all(&batch, Utc::now() + Duration::hours(1)).await);
    assert!(path.exists());

    let reopened = CacheGateway::new(Arc::new(FileCache::open(&path).await.unwrap()));
    let record = reopened.find(&key("doi:10.1/x")).await.unwrap();
    assert_eq!(record.data, long("10.1/x", "A Paper"));
    assert!(reopened.find(&key("RFC2119")).await.is_some());
    assert!(reopened.find(&key("rfc2119")).await.is_none());
}

#[tokio::test]
async fn test_corrupt_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("references.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let gateway = CacheGateway::new(Arc::new(FileCache::open(&path).await.unwrap()));
    assert!(gateway.find(&key("RFC2119")).await.is_none());

    let mut batch = IndexMap::new();
    batch.insert(key("RFC2119"), short("Key words"));
    assert!(gateway.add_all(&batch, Utc::now() + Duration::hours(1)).await);
    assert!(gateway.find(&key("RFC2119")).await.is_some());
}

#[tokio::test]
async fn test_writes_prune_expired_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("references.json");
    let gateway = CacheGateway::new(Arc::new(FileCache::open(&path).await.unwrap()));

    let mut old = IndexMap::new();
    old.insert(key("OLD"), short("Old"));
    gateway.add_all(&old, Utc::now() - Duration::minutes(1)).await;

    let mut new = IndexMap::new();
    new.insert(key("NEW"), short("New"));
    gateway.add_all(&new, Utc::now() + Duration::hours(1)).await;

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("NEW"));
    assert!(!content.contains("OLD"));
}

#[tokio::test]
async fn test_clear_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("references.json");
    let gateway = CacheGateway::new(Arc::new(FileCache::open(&path).await.unwrap()));

    let mut batch = IndexMap::new();
    batch.insert(key("HTML"), short("HTML"));
    gateway.add_all(&batch, Utc::now() + Duration::hours(1)).await;
    assert!(path.exists());

    assert!(gateway.clear().await);
    assert!(!path.exists());
    assert!(gateway.find(&key("HTML")).await.is_none());
}

#[tokio::test]
async fn test_open_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = CacheConfig {
        path: Some(dir.path().join("refs.json")),
        ..Default::default()
    };
    assert!(CacheGateway::open(&config).await.is_available());

    let disabled = CacheConfig {
        enabled: false,
        ..config
    };
    assert!(!CacheGateway::open(&disabled).await.is_available());
}

#[tokio::test]
async fn test_unusable_path_disables_cache() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    // A regular file where the parent directory should be.
    let config = CacheConfig {
        path: Some(blocker.join("refs.json")),
        ..Default::default()
    };
    let gateway = CacheGateway::open(&config).await;
    assert!(!gateway.is_available());
    assert!(gateway.find(&key("HTML")).await.is_none());
}

#[tokio::test]
async fn test_failed_write_keeps_memory_in_step_with_disk() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("cache");
    let path = parent.join("references.json");
    let gateway = CacheGateway::new(Arc::new(FileCache::open(&path).await.unwrap()));

    let mut first = IndexMap::new();
    first.insert(key("KEEP"), short("Keep"));
    assert!(gateway.add_all(&first, Utc::now() + Duration::hours(1)).await);

    // Nowhere left to write the temporary file.
    std::fs::remove_dir_all(&parent).unwrap();

    let mut second = IndexMap::new();
    second.insert(key("LOST"), short("Lost"));
    assert!(!gateway.add_all(&second, Utc::now() + Duration::hours(1)).await);

    assert!(gateway.find(&key("KEEP")).await.is_some());
    assert!(gateway.find(&key("LOST")).await.is_none());
}
