//! End-to-end command tests against the in-memory platform

use platdemo_cli::demo::WriteOptions;
use platdemo_cli::{flux, Demo, DemoConfig, Namespace};
use platdemo_client::MemoryPlatform;
use platdemo_core::traits::{BucketService, TaskService};
use std::time::Duration;

fn demo(platform: &MemoryPlatform) -> Demo<MemoryPlatform> {
    Demo::new(
        platform.clone(),
        Namespace::new("test").unwrap(),
        DemoConfig::default(),
    )
}

fn quick(count: u64) -> WriteOptions {
    WriteOptions {
        count: Some(count),
        interval: Duration::from_millis(1),
    }
}

#[tokio::test]
async fn test_bootstrap_creates_scoped_authorizations() {
    let platform = MemoryPlatform::new();
    let created = demo(&platform).bootstrap().await.unwrap();

    assert_eq!(created.user.name, "demo-user-test");
    assert_eq!(created.org.name, "demo-org-test");
    assert_eq!(created.bucket_in.retention_rules[0].every_seconds, 3600);
    assert_eq!(created.bucket_out.retention_rules[0].every_seconds, 24 * 3600);

    let perms: Vec<usize> = created
        .authorizations
        .iter()
        .map(|a| a.permissions.len())
        .collect();
    assert_eq!(perms, vec![1, 1, 3, 1]);

    let bucket = platform
        .find_bucket_by_name("demo-org-test", "demo-bucket-out-test")
        .await
        .unwrap();
    assert_eq!(bucket.id, created.bucket_out.id);
}

#[tokio::test]
async fn test_bootstrap_twice_fails() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    demo.bootstrap().await.unwrap();
    assert!(demo.bootstrap().await.is_err());
}

#[tokio::test]
async fn test_write_uses_write_authorization() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    let created = demo.bootstrap().await.unwrap();

    let written = demo
        .write(quick(3), std::future::pending::<()>())
        .await
        .unwrap();
    assert_eq!(written, 3);

    let writes = platform.writes().await;
    let lines: Vec<&str> = writes.iter().map(|w| w.lines.as_str()).collect();
    assert_eq!(lines, vec!["counter n=0", "counter n=1", "counter n=2"]);
    assert!(writes
        .iter()
        .all(|w| w.token == created.authorizations[0].token && w.bucket == "demo-bucket-in-test"));
}

#[tokio::test]
async fn test_write_stops_on_shutdown() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    demo.bootstrap().await.unwrap();

    let options = WriteOptions {
        count: None,
        interval: Duration::from_secs(3600),
    };
    let written = demo.write(options, async {}).await.unwrap();
    assert_eq!(written, 1);
}

#[tokio::test]
async fn test_write_failure_ends_loop() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    let created = demo.bootstrap().await.unwrap();
    let writer = created.authorizations[0].id;

    let options = WriteOptions {
        count: Some(5),
        interval: Duration::from_millis(200),
    };
    let revoke_after_first_write = async {
        while platform.writes().await.is_empty() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        platform.deactivate_authorization(writer).await.unwrap();
    };

    let (result, ()) = tokio::join!(
        demo.write(options, std::future::pending::<()>()),
        revoke_after_first_write
    );

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("counter n=1"));
    assert_eq!(platform.writes().await.len(), 1);
}

#[tokio::test]
async fn test_write_without_bootstrap_fails() {
    let platform = MemoryPlatform::new();
    let err = demo(&platform)
        .write(quick(1), std::future::pending::<()>())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("demo-user-test"));
    assert!(platform.writes().await.is_empty());
}

#[tokio::test]
async fn test_reads_use_read_authorizations() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    let created = demo.bootstrap().await.unwrap();

    let csv = demo.read_in("-5s").await.unwrap();
    assert_eq!(csv, ",result,table\n");
    demo.read_out("-15s").await.unwrap();

    let queries = platform.queries().await;
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].token, created.authorizations[1].token);
    assert_eq!(queries[0].flux, flux::read_range("demo-bucket-in-test", "-5s"));
    assert_eq!(queries[0].org_id, created.org.id);
    assert_eq!(queries[1].token, created.authorizations[3].token);
    assert_eq!(queries[1].flux, flux::read_range("demo-bucket-out-test", "-15s"));
}

#[tokio::test]
async fn test_downsample_once_uses_combined_authorization() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    let created = demo.bootstrap().await.unwrap();

    demo.downsample_once().await.unwrap();

    let queries = platform.queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].token, created.authorizations[2].token);
    assert_eq!(
        queries[0].flux,
        flux::downsample("demo-bucket-in-test", "-5s", "demo-bucket-out-test", "demo-org-test")
    );
}

#[tokio::test]
async fn test_create_task() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    let created = demo.bootstrap().await.unwrap();

    let task = demo.create_task().await.unwrap();
    assert!(task.name.starts_with("demo-"));
    assert!(task.flux.starts_with("option task = { name: \"demo-"));
    assert!(task.flux.contains("every: 5s"));

    let tasks = platform.find_tasks_by_org(created.org.id).await.unwrap();
    assert_eq!(tasks, vec![task]);
}

#[tokio::test]
async fn test_inactive_authorization_gives_up() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    let created = demo.bootstrap().await.unwrap();

    platform
        .deactivate_authorization(created.authorizations[0].id)
        .await
        .unwrap();

    let err = demo
        .write(quick(1), std::future::pending::<()>())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "giving up");
    assert!(format!("{:#}", err).contains("4 examined"));
    assert!(platform.writes().await.is_empty());
}

#[tokio::test]
async fn test_missing_combined_authorization_gives_up() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    let created = demo.bootstrap().await.unwrap();

    platform
        .deactivate_authorization(created.authorizations[2].id)
        .await
        .unwrap();

    assert!(demo.downsample_once().await.is_err());
    assert!(demo.create_task().await.is_err());
    // Single-bucket reads are unaffected
    demo.read_in("-5s").await.unwrap();
}

#[tokio::test]
async fn test_list() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);

    let empty = demo.list().await;
    assert!(empty.user.is_none());
    assert!(empty.org.is_none());
    assert!(empty.bucket_in.is_none());
    assert!(empty.authorizations.is_empty());

    let created = demo.bootstrap().await.unwrap();
    let listing = demo.list().await;
    assert_eq!(listing.user, Some(created.user));
    assert_eq!(listing.org, Some(created.org));
    assert_eq!(listing.bucket_in, Some(created.bucket_in));
    assert_eq!(listing.bucket_out, Some(created.bucket_out));
    assert_eq!(listing.authorizations, created.authorizations);
}

#[tokio::test]
async fn test_destroy_removes_everything() {
    let platform = MemoryPlatform::new();
    let demo = demo(&platform);
    demo.bootstrap().await.unwrap();
    demo.create_task().await.unwrap();

    let deleted = demo.destroy().await;
    assert_eq!(deleted, 9);
    assert_eq!(platform.entity_count().await, 0);

    // A second pass finds nothing and still succeeds
    assert_eq!(demo.destroy().await, 0);
}

#[tokio::test]
async fn test_destroy_leaves_other_namespaces() {
    let platform = MemoryPlatform::new();
    let other = Demo::new(
        platform.clone(),
        Namespace::new("other").unwrap(),
        DemoConfig::default(),
    );
    other.bootstrap().await.unwrap();
    let before = platform.entity_count().await;

    assert_eq!(demo(&platform).destroy().await, 0);
    assert_eq!(platform.entity_count().await, before);
}
