//! Many concurrent connections against one server.

use std::time::Instant;

mod common;

#[tokio::test]
async fn test_concurrent_connections() {
    let server = common::start_server().await;
    let addr = server.local_addr();

    let concurrency = 20;
    let requests_per_task = 10;
    let total_requests = concurrency * requests_per_task;

    let start = Instant::now();
    let mut tasks = Vec::new();
    for task_id in 0..concurrency {
        tasks.push(tokio::spawn(async move {
            let mut ok = 0;
            for i in 0..requests_per_task {
                let payload = format!("task {task_id} request {i}");
                let raw = format!(
                    "POST /echo HTTP/1.1\r\nHost: x\r\nContent-Length: {}\r\n\r\n{}",
                    payload.len(),
                    payload
                );
                let response = common::send_raw(addr, raw.as_bytes()).await;
                let (head, body) = common::split_response(&response);
                if head.starts_with("HTTP/1.1 200 OK") && body == payload {
                    ok += 1;
                }
            }
            ok
        }));
    }

    let mut successes = 0;
    for task in tasks {
        successes += task.await.unwrap();
    }

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", start.elapsed());
    println!("Success Rate:   {}/{}", successes, total_requests);
    println!("-------------------------\n");

    assert_eq!(successes, total_requests);
    server.close();
}
