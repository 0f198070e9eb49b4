//! Owner collection integration tests.
//!
//! These tests drive the collector and the full report run against the
//! in-memory host: concurrency ceiling, completion barrier, fallback paths
//! and the CSV output.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use repo_owners_core::{
    build_report, run_report,
    testing::{fixtures, MockRepositoryHost},
    CollectorConfig, Config, HostError, OwnershipCollector, RepositoryHost, RunOptions,
};

fn collector(host: &Arc<MockRepositoryHost>, max_concurrent: usize) -> OwnershipCollector {
    let config = CollectorConfig {
        max_concurrent,
        ..Default::default()
    };
    OwnershipCollector::new(Arc::clone(host) as Arc<dyn RepositoryHost>, &config, "github")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_never_exceeds_ceiling() {
    let host = Arc::new(MockRepositoryHost::new());
    let repos = fixtures::repositories("svc", 1000);
    for repo in repos.iter().step_by(2) {
        host.set_file(&repo.name, "CODEOWNERS", "* @alice").await;
    }
    host.set_repositories(repos.clone()).await;
    host.set_delay(Duration::from_millis(2)).await;

    let collector = collector(&host, 20);
    let records = collector.run("acme", &repos, None).await;

    assert_eq!(records.len(), 1000);
    assert!(
        host.peak_in_flight() <= 20,
        "peak in flight was {}",
        host.peak_in_flight()
    );
    assert!(host.peak_in_flight() > 1, "lookups never overlapped");
    assert_eq!(host.in_flight(), 0);
    assert_eq!(collector.stats().active, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_smaller_ceiling_is_respected() {
    let host = Arc::new(MockRepositoryHost::new());
    let repos = fixtures::repositories("svc", 100);
    host.set_delay(Duration::from_millis(2)).await;

    let records = collector(&host, 3).run("acme", &repos, None).await;

    assert_eq!(records.len(), 100);
    assert!(host.peak_in_flight() <= 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_completion_barrier_with_uneven_timing() {
    let host = Arc::new(MockRepositoryHost::new());
    let repos = fixtures::repositories("svc", 200);
    for (i, repo) in repos.iter().enumerate() {
        match i % 4 {
            0 => host.set_file(&repo.name, "CODEOWNERS", "* @alice").await,
            1 => {
                host.set_file(&repo.name, ".github/CODEOWNERS", "* @bob")
                    .await
            }
            2 => {
                host.set_error(&repo.name, "CODEOWNERS", || HostError::Api {
                    status: 502,
                    message: "bad gateway".to_string(),
                })
                .await
            }
            _ => {}
        }
    }
    host.set_delay(Duration::from_millis(1)).await;

    let records = collector(&host, 20).run("acme", &repos, None).await;

    assert_eq!(records.len(), repos.len());
    let expected: HashSet<String> = repos
        .iter()
        .map(|r| format!("https://github.com/acme/{}", r.name))
        .collect();
    let actual: HashSet<String> = records.keys().cloned().collect();
    assert_eq!(actual, expected);

    assert_eq!(records["https://github.com/acme/svc-0"], "@alice");
    assert_eq!(records["https://github.com/acme/svc-1"], "@bob");
    assert_eq!(records["https://github.com/acme/svc-2"], "None");
    assert_eq!(records["https://github.com/acme/svc-3"], "None");
}

#[tokio::test]
async fn test_run_report_writes_csv() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let host = Arc::new(MockRepositoryHost::new());
    host.add_repository("widgets").await;
    host.add_repository("gadgets").await;
    host.add_repository("legacy").await;
    host.set_file(
        "widgets",
        "CODEOWNERS",
        fixtures::codeowners(&[("*.go", &["alice", "bob", "alice"][..]), ("*.py", &["bob", "carol"][..])]),
    )
    .await;
    host.set_file("gadgets", ".github/CODEOWNERS", "* alice").await;

    let mut config = Config::default();
    config.output.base_name = temp_dir.path().join("report").display().to_string();

    let summary = run_report(&config, host, &RunOptions::new("acme"))
        .await
        .expect("run should succeed");

    assert_eq!(summary.repositories, 3);
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.output_path, temp_dir.path().join("report.csv"));

    let mut reader = csv::Reader::from_path(&summary.output_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "url");
    assert_eq!(&headers[1], "owners");

    let mut rows: Vec<(String, String)> = reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string())
        })
        .collect();
    rows.sort();

    assert_eq!(
        rows,
        vec![
            ("https://github.com/acme/gadgets".to_string(), "alice".to_string()),
            ("https://github.com/acme/legacy".to_string(), "None".to_string()),
            (
                "https://github.com/acme/widgets".to_string(),
                "alice\nbob\ncarol".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn test_filtered_report_with_known_owners_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let known_path = temp_dir.path().join("owners_to_watch.txt");
    std::fs::write(&known_path, "@platform\n@security\n").unwrap();

    let host = Arc::new(MockRepositoryHost::new());
    host.add_repository("api").await;
    host.add_repository("web").await;
    host.set_file("api", "CODEOWNERS", "*.go @alice\n/auth/ @bob @security\n* @platform")
        .await;
    host.set_file("web", "CODEOWNERS", "* @alice").await;

    let options = RunOptions::new("acme").with_known_owners_file(&known_path);
    let report = build_report(&Config::default(), host, &options)
        .await
        .expect("run should succeed");

    let rows: std::collections::HashMap<_, _> = report
        .table
        .records()
        .iter()
        .map(|[url, owner]| (url.clone(), owner.clone()))
        .collect();

    assert_eq!(rows["https://github.com/acme/api"], "@security");
    assert_eq!(rows["https://github.com/acme/web"], "None");
}

#[tokio::test]
async fn test_run_report_unwritable_output_is_fatal() {
    let host = Arc::new(MockRepositoryHost::new());
    host.add_repository("widgets").await;

    let mut config = Config::default();
    config.output.base_name = "/nonexistent-dir/report".to_string();

    let result = run_report(&config, host, &RunOptions::new("acme")).await;
    assert!(matches!(result, Err(repo_owners_core::JobError::Report(_))));
}
