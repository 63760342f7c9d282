//! End-to-end HTTP tests.
//!
//! Each test starts its own server process on a dedicated port, drives it
//! over HTTP with reqwest, and tears it down afterwards. Tests run in
//! parallel, so every test owns a distinct port.

use std::net::TcpStream;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

/// Manages a server process lifecycle for one test.
struct ServerProcess {
    child: Child,
    base_url: String,
}

impl ServerProcess {
    /// Spawn the server binary on the given port and wait until it accepts
    /// TCP connections.
    fn start(port: u16) -> Self {
        let child = Command::new(env!("CARGO_BIN_EXE_podscope"))
            .env("PORT", port.to_string())
            .env("RUST_LOG", "podscope=info")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to start server binary");

        let server = Self {
            child,
            base_url: format!("http://127.0.0.1:{port}"),
        };
        server.wait_for_ready(port);
        server
    }

    /// Wait for the server to be ready to accept connections.
    fn wait_for_ready(&self, port: u16) {
        let max_attempts = 50;
        let delay = Duration::from_millis(100);

        for _ in 0..max_attempts {
            if TcpStream::connect(format!("127.0.0.1:{port}")).is_ok() {
                return;
            }
            std::thread::sleep(delay);
        }

        panic!(
            "server did not start on port {port} within {} seconds",
            max_attempts as f64 * delay.as_secs_f64()
        );
    }

    /// Send SIGTERM, starting a graceful shutdown.
    fn terminate(&self) {
        kill(Pid::from_raw(self.child.id() as i32), Signal::SIGTERM)
            .expect("Failed to signal server");
    }

    /// Poll until the process exits, up to the timeout.
    fn wait_for_exit(&mut self, timeout: Duration) -> Option<ExitStatus> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = self.child.try_wait().expect("try_wait failed") {
                return Some(status);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        if self.child.try_wait().ok().flatten().is_none() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}

/// Client that closes connections after each exchange, so shutdown tests
/// are not held up by idle keep-alive sockets.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
async fn root_returns_snapshot_with_sentinel_name() {
    let server = ServerProcess::start(3210);
    let response = client()
        .get(&server.base_url)
        .header("x-probe", "abc")
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=UTF-8"
    );
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");

    let body = response.text().await.unwrap();
    // pretty-printed, one field per line
    assert!(body.contains("\n  \"hostname\""));

    let info: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(info["param_name"], "_NO_PARAMETER_NAME_");
    assert_eq!(info["appname"], "podscope");
    assert_eq!(info["pid"].as_u64().unwrap(), server.child.id() as u64);
    assert_eq!(info["uptime"], "");
    assert!(!info["env_vars"].as_array().unwrap().is_empty());
    assert_eq!(info["headers"]["x-probe"][0], "abc");
    assert!(!info["remote_addr"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn root_name_parameter_overrides_sentinel() {
    let server = ServerProcess::start(3211);
    let response = client()
        .get(format!("{}/?name=foo", server.base_url))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), 200);
    let info: serde_json::Value = response.json().await.unwrap();
    assert_eq!(info["param_name"], "foo");

    // an empty value keeps the sentinel
    let response = client()
        .get(format!("{}/?name=", server.base_url))
        .send()
        .await
        .expect("request failed");
    let info: serde_json::Value = response.json().await.unwrap();
    assert_eq!(info["param_name"], "_NO_PARAMETER_NAME_");
}

#[tokio::test]
async fn unknown_path_returns_decorative_404() {
    let server = ServerProcess::start(3212);
    let response = client()
        .get(format!("{}/unknown", server.base_url))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), 404);
    let body = response.text().await.unwrap();
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("𝟜𝟘𝟜"));
}

#[tokio::test]
async fn non_get_methods_return_405_with_fixed_text() {
    let server = ServerProcess::start(3213);
    let http = client();

    for path in ["/", "/time", "/wait", "/readiness", "/health", "/unknown"] {
        let response = http
            .post(format!("{}{path}", server.base_url))
            .send()
            .await
            .expect("request failed");

        assert_eq!(response.status(), 405, "POST {path}");
        let body = response.text().await.unwrap();
        assert_eq!(body, "ERROR: Http method not allowed", "POST {path}");
    }
}

#[tokio::test]
async fn time_returns_current_rfc3339_timestamp() {
    let server = ServerProcess::start(3214);
    let response = client()
        .get(format!("{}/time", server.base_url))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), 200);
    let value: serde_json::Value = response.json().await.unwrap();
    let reported = chrono::DateTime::parse_from_rfc3339(value["time"].as_str().unwrap())
        .expect("time field should be RFC3339");
    let skew = (chrono::Utc::now() - reported.with_timezone(&chrono::Utc))
        .num_seconds()
        .abs();
    assert!(skew < 5, "reported time is {skew}s off");
}

#[tokio::test]
async fn wait_blocks_for_the_configured_delay() {
    let server = ServerProcess::start(3215);
    let started = Instant::now();
    let response = client()
        .get(format!("{}/wait", server.base_url))
        .send()
        .await
        .expect("request failed");
    let elapsed = started.elapsed();

    assert_eq!(response.status(), 200);
    assert!(elapsed >= Duration::from_secs(3), "answered after {elapsed:?}");
    let body = response.text().await.unwrap();
    assert_eq!(body, r#"{"waited":"3 seconds"}"#);
}

#[tokio::test]
async fn probes_return_200_with_empty_body() {
    let server = ServerProcess::start(3216);
    let http = client();

    for path in ["/readiness", "/health"] {
        let response = http
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .expect("request failed");

        assert_eq!(response.status(), 200, "GET {path}");
        assert!(response.text().await.unwrap().is_empty(), "GET {path}");
    }
}

#[tokio::test]
async fn sigterm_triggers_clean_exit() {
    let mut server = ServerProcess::start(3217);

    // prove it serves traffic first
    let response = client()
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(response.status(), 200);

    server.terminate();
    let status = server
        .wait_for_exit(Duration::from_secs(8))
        .expect("server did not exit after SIGTERM");
    assert_eq!(status.code(), Some(0));
}

#[tokio::test]
async fn sigterm_lets_in_flight_request_finish() {
    let mut server = ServerProcess::start(3218);
    let base_url = server.base_url.clone();

    // Start a /wait request (3s), then signal while it is in flight. The 5s
    // grace period exceeds the remaining wait, so the request must complete.
    let in_flight =
        tokio::spawn(async move { client().get(format!("{base_url}/wait")).send().await });
    tokio::time::sleep(Duration::from_millis(500)).await;
    server.terminate();

    let response = in_flight
        .await
        .unwrap()
        .expect("in-flight request should complete during the grace period");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), r#"{"waited":"3 seconds"}"#);

    let status = server
        .wait_for_exit(Duration::from_secs(8))
        .expect("server did not exit after SIGTERM");
    assert_eq!(status.code(), Some(0));
}
