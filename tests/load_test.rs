//! Concurrent load against a single in-memory store.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let server = common::start_server().await;

    let concurrency = 20;
    let requests_per_task = 10;
    let total_requests = concurrency * requests_per_task;

    let start = Instant::now();
    let mut handles = Vec::new();
    for task in 0..concurrency {
        let client = server.client.clone();
        let url = server.url("/api/comments");
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..requests_per_task {
                let res = client
                    .post(&url)
                    .json(&json!({
                        "author": format!("Writer {task}"),
                        "content": format!("Concurrent comment {task}-{i}"),
                    }))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status(), 201);
                let body: Value = res.json().await.unwrap();
                ids.push(body["data"]["id"].as_i64().unwrap());
            }
            ids
        }));
    }

    let mut all_ids = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(all_ids.insert(id), "duplicate id {id}");
        }
    }
    let elapsed = start.elapsed();

    println!(
        "{} creates in {:?} ({:.0} req/s)",
        total_requests,
        elapsed,
        total_requests as f64 / elapsed.as_secs_f64()
    );
    assert_eq!(all_ids.len(), total_requests);
    assert!(elapsed < Duration::from_secs(30));

    let res = server
        .client
        .get(server.url("/api/comments"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total"], total_requests);
}
