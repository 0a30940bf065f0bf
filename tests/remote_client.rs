#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use tasksync::api::{RemoteError, TaskApi, TaskClient, TaskQuery};
    use tasksync::libs::config::ServerConfig;
    use tasksync::libs::filter::Filter;
    use tasksync::libs::task::{TaskDraft, TaskId, TaskPatch};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Serves a single canned response and hands back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (TaskClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        let client = TaskClient::new(&ServerConfig {
            api_url: format!("http://{}/drfapi/", addr),
        });
        (client, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buffer.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).to_string()
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    fn request_body(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_list_tasks() {
        let (client, server) = serve_once(
            "200 OK",
            r#"[{"id":2,"value":"b","checked":true,"removed":false},{"id":1,"value":"a","checked":false,"removed":true}]"#,
        )
        .await;

        let tasks = client.list_tasks().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request_line(&request), "GET /drfapi/tasks/ HTTP/1.1");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, TaskId(2));
        assert!(tasks[0].checked);
        assert!(tasks[1].removed);
    }

    #[tokio::test]
    async fn test_list_tasks_missing_flags_default_to_false() {
        let (client, server) = serve_once("200 OK", r#"[{"id":9,"value":"bare"}]"#).await;

        let tasks = client.list_tasks().await.unwrap();
        server.await.unwrap();

        assert!(!tasks[0].checked);
        assert!(!tasks[0].removed);
    }

    #[tokio::test]
    async fn test_list_with_server_filter() {
        let (client, server) = serve_once("200 OK", "[]").await;

        let tasks = client
            .list_tasks_where(TaskQuery::for_filter(Filter::Unchecked))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(tasks.is_empty());
        assert_eq!(
            request_line(&request),
            "GET /drfapi/tasks/?removed=false&checked=false HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_create_task() {
        let (client, server) = serve_once(
            "201 Created",
            r#"{"id":17,"value":"buy milk","checked":false,"removed":false}"#,
        )
        .await;

        let created = client.create_task(TaskDraft::new("buy milk")).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request_line(&request), "POST /drfapi/tasks/ HTTP/1.1");
        assert_eq!(
            request_body(&request),
            serde_json::json!({"value": "buy milk", "checked": false, "removed": false})
        );
        assert_eq!(created.id, TaskId(17));
    }

    #[tokio::test]
    async fn test_update_sends_only_present_fields() {
        let (client, server) = serve_once(
            "200 OK",
            r#"{"id":5,"value":"renamed","checked":true,"removed":false}"#,
        )
        .await;

        let patch = TaskPatch {
            value: None,
            checked: Some(true),
            removed: None,
        };
        let updated = client.update_task(TaskId(5), patch).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request_line(&request), "PUT /drfapi/tasks/5/ HTTP/1.1");
        assert_eq!(request_body(&request), serde_json::json!({"checked": true}));
        assert_eq!(updated.value, "renamed");
    }

    #[tokio::test]
    async fn test_delete_task() {
        let (client, server) = serve_once("204 No Content", "").await;

        client.delete_task(TaskId(5)).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request_line(&request), "DELETE /drfapi/tasks/5/ HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (client, server) = serve_once("400 Bad Request", r#"{"value":["This field may not be blank."]}"#).await;

        let err = client.create_task(TaskDraft::new("")).await.unwrap_err();
        server.await.unwrap();

        match err {
            RemoteError::Status { status, body, url } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("may not be blank"));
                assert!(url.ends_with("/drfapi/tasks/"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let (client, server) = serve_once("200 OK", r#"{"tasks": "nope"}"#).await;

        let err = client.list_tasks().await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, RemoteError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = TaskClient::new(&ServerConfig {
            api_url: format!("http://{}/drfapi", addr),
        });
        let err = client.list_tasks().await.unwrap_err();

        assert!(matches!(err, RemoteError::Transport { .. }));
        assert!(err.to_string().contains(&addr.to_string()));
    }
}
