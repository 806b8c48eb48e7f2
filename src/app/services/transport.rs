use tracing::{info, warn};

use super::summary::SubmissionPayload;
use crate::app::domain::settings::PLACEHOLDER_ENDPOINT;
use crate::app::infrastructure::error::TransportError;

/// Delivers a summary payload to a remote endpoint. Runs off the UI thread.
pub trait Transport: Send + Sync {
    fn post(&self, endpoint: &str, payload: &SubmissionPayload) -> Result<(), TransportError>;
}

/// Plain HTTP(S) POST with a JSON body. No timeout: a hung request keeps
/// the send trigger disabled until the server answers or the socket fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn post(&self, endpoint: &str, payload: &SubmissionPayload) -> Result<(), TransportError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() || endpoint == PLACEHOLDER_ENDPOINT {
            return Err(TransportError::EndpointNotConfigured);
        }

        let request = minreq::post(endpoint)
            .with_header("Content-Type", "application/json")
            .with_json(payload)
            .map_err(|e| TransportError::Encode(e.to_string()))?;

        let response = request
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if (200..300).contains(&response.status_code) {
            info!(status = response.status_code, "contract summary delivered");
            Ok(())
        } else {
            warn!(
                status = response.status_code,
                reason = %response.reason_phrase,
                "endpoint rejected contract summary"
            );
            Err(TransportError::Status(response.status_code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::thread;

    use chrono::{TimeZone, Utc};

    use crate::app::controllers::form::{FormController, SendState};
    use crate::app::domain::form::FieldId;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            formatted_contract: "Project Title: Loft".to_string(),
        }
    }

    /// Accept one connection, answer with `status_line`, and hand back the
    /// request headers and body.
    fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<(String, String)>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut headers = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                headers.push_str(&line);
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();

            let mut stream = reader.into_inner();
            let response = format!("{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status_line);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            (headers, String::from_utf8(body).unwrap())
        });
        (url, handle)
    }

    #[test]
    fn test_placeholder_endpoint_is_rejected() {
        let result = HttpTransport.post(PLACEHOLDER_ENDPOINT, &payload());
        assert_eq!(result, Err(TransportError::EndpointNotConfigured));
        assert_eq!(HttpTransport.post("  ", &payload()), Err(TransportError::EndpointNotConfigured));
    }

    #[test]
    fn test_post_sends_json_body() {
        let (url, server) = serve_once("HTTP/1.1 200 OK");
        let result = HttpTransport.post(&url, &payload());
        let (headers, body) = server.join().unwrap();

        assert_eq!(result, Ok(()));
        assert!(headers.starts_with("POST /hook "));
        assert!(headers.to_ascii_lowercase().contains("content-type: application/json"));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["formattedContract"], "Project Title: Loft");
    }

    #[test]
    fn test_error_status_is_reported() {
        let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error");
        let result = HttpTransport.post(&url, &payload());
        server.join().unwrap();
        assert_eq!(result, Err(TransportError::Status(500)));
    }

    #[test]
    fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/hook", listener.local_addr().unwrap());
        drop(listener);
        let result = HttpTransport.post(&url, &payload());
        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    /// Records every payload and answers with a fixed result.
    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
        answer: Result<(), TransportError>,
    }

    impl Transport for RecordingTransport {
        fn post(&self, endpoint: &str, payload: &SubmissionPayload) -> Result<(), TransportError> {
            assert_eq!(endpoint, "https://hooks.example.com/contract");
            self.sent.lock().unwrap().push(payload.formatted_contract.clone());
            self.answer.clone()
        }
    }

    #[test]
    fn test_send_lifecycle_through_worker_thread() {
        let transport: Arc<dyn Transport> = Arc::new(RecordingTransport {
            sent: Mutex::new(Vec::new()),
            answer: Err(TransportError::Status(502)),
        });
        let mut form = FormController::new();
        form.set_value(FieldId::ProjectTitle, "Loft conversion");

        let now = Utc.with_ymd_and_hms(2024, 6, 3, 10, 15, 30).unwrap();
        let payload = form.begin_send(now).unwrap();
        assert_eq!(form.send_state(), SendState::InFlight);
        assert!(form.begin_send(now).is_none());

        let worker = Arc::clone(&transport);
        let result = thread::spawn(move || worker.post("https://hooks.example.com/contract", &payload))
            .join()
            .unwrap();
        assert_eq!(form.finish_send(&result), SendState::Ready);
        assert_eq!(form.send_label(), "Send Contract");
    }

    #[test]
    fn test_payload_is_rebuilt_on_each_attempt() {
        let recorder = Arc::new(RecordingTransport {
            sent: Mutex::new(Vec::new()),
            answer: Ok(()),
        });
        let mut form = FormController::new();
        let now = Utc.with_ymd_and_hms(2024, 6, 3, 10, 15, 30).unwrap();

        let first = form.begin_send(now).unwrap();
        form.finish_send(&Err(TransportError::Network("reset".to_string())));
        form.set_value(FieldId::ProjectTitle, "Second try");
        let second = form.begin_send(now).unwrap();
        assert_eq!(form.finish_send(&recorder.post("https://hooks.example.com/contract", &second)), SendState::Sent);
        assert!(form.begin_send(now).is_none());

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Project Title: Second try\n"));
        assert!(first.formatted_contract.starts_with("Project Title: \n"));
    }
}
