//! Bucket listing integration tests using LocalStack.
//!
//! These tests verify that the service lists real S3 buckets, follows
//! continuation tokens and caches folder listings.

use crate::common::LocalStackTestContext;
use bt_lister::{BucketTreeService, ListingConfig, TreeCache, cache_key, create_s3_client};
use std::sync::Arc;

async fn service_for(
    ctx: &LocalStackTestContext,
    page_size: u32,
) -> BucketTreeService<aws_sdk_s3::Client> {
    let client = create_s3_client(&ctx.s3_config()).await.unwrap();
    BucketTreeService::new(client, Arc::new(TreeCache::new()))
        .with_config(ListingConfig::new().with_page_size(page_size))
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_list_nested_tree() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "test-tree-bucket";
    ctx.create_bucket(bucket).await.unwrap();

    let keys = ["a/", "a/b/", "a/b/c.txt", "a/b/d.txt", "a/e.txt", "other/f.txt"];
    ctx.put_all(bucket, &keys).await.unwrap();

    let service = service_for(&ctx, 50).await;
    let root = service.list(bucket, &["a"]).await.unwrap();

    // Only the "a" prefix is listed; folder markers add nothing
    assert_eq!(root.files.len(), 1);
    let a = &root.files[0];
    assert_eq!(a.name.as_deref(), Some("a"));
    assert_eq!(a.files.len(), 2);

    let b = a.child_named("b").unwrap();
    assert_eq!(b.files.len(), 2);
    assert!(b.files.iter().all(|f| f.extension.as_deref() == Some("txt")));

    let e = a.child_named("e").unwrap();
    assert!(e.is_leaf());

    ctx.cleanup(bucket, &keys).await;
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_list_follows_continuation_tokens() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "test-paging-bucket";
    ctx.create_bucket(bucket).await.unwrap();

    let keys: Vec<String> = (0..7).map(|i| format!("pages/item{i}.json")).collect();
    let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    ctx.put_all(bucket, &key_refs).await.unwrap();

    // Page size 2 forces four list calls
    let service = service_for(&ctx, 2).await;
    let root = service.list(bucket, &["pages/"]).await.unwrap();

    assert_eq!(root.leaf_count(), 7);
    assert_eq!(root.files[0].files.len(), 7);

    let flat = service.list_folder(bucket, "pages/").await.unwrap();
    assert_eq!(flat.files.len(), 7);
    assert!(flat.files.iter().all(|f| f.url.is_some()));

    ctx.cleanup(bucket, &key_refs).await;
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_list_folder_is_cached() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "test-cache-bucket";
    ctx.create_bucket(bucket).await.unwrap();

    let keys = ["logs/2024.01.report.csv", "logs/app.log"];
    ctx.put_all(bucket, &keys).await.unwrap();

    let service = service_for(&ctx, 50).await;
    let first = service.list_folder(bucket, "logs/").await.unwrap();

    let report = first
        .files
        .iter()
        .find(|f| f.url.as_deref() == Some("logs/2024.01.report.csv"))
        .unwrap();
    assert_eq!(report.name.as_deref(), Some("2024"));
    assert_eq!(report.extension.as_deref(), Some("01"));

    // Objects added after the first listing are not seen: the entry is cached
    ctx.put(bucket, "logs/late.log").await.unwrap();
    let second = service.list_folder(bucket, "logs/").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.files.len(), 2);
    assert!(service.cache().contains(&cache_key(bucket, "logs/")));

    ctx.cleanup(bucket, &["logs/2024.01.report.csv", "logs/app.log", "logs/late.log"])
        .await;
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_missing_bucket_is_transport_error() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let service = service_for(&ctx, 50).await;
    let err = service
        .list_folder("bucket-that-does-not-exist", "")
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(service.cache().is_empty());
}
