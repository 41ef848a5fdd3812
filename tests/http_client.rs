use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use soulbuddy::api::{ApiError, HttpApi, SoulBuddyApi};
use soulbuddy::models::{BirthDetails, ChatRequest, Gender, ZodiacSign};

/// Canned response for one `METHOD /path`
struct Route {
    request_line: &'static str,
    status: u16,
    body: String,
}

type Seen = Arc<Mutex<Vec<(String, String)>>>;

/// Minimal HTTP/1.1 backend answering from `routes` and recording requests
async fn stub_backend(routes: Vec<Route>) -> (SocketAddr, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("local addr");
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let routes = Arc::new(routes);

    tokio::spawn({
        let seen = seen.clone();
        async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let (request_line, body) = read_request(&mut stream).await;
                seen.lock().unwrap().push((request_line.clone(), body));

                let (status, payload) = routes
                    .iter()
                    .find(|r| request_line.starts_with(r.request_line))
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, r#"{"detail":"Not Found"}"#.to_string()));
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason(status),
                    payload.len(),
                    payload
                );
                stream
                    .write_all(response.as_bytes())
                    .await
                    .expect("write response");
                let _ = stream.shutdown().await;
            }
        }
    });

    (addr, seen)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> (String, String) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.expect("read request");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        assert!(n > 0, "connection closed before headers");
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.expect("read body");
        assert!(n > 0, "connection closed before body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let request_line = head.lines().next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..header_end + content_length]).to_string();
    (request_line, body)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn details() -> BirthDetails {
    BirthDetails {
        year: 1990,
        month: 6,
        day: 15,
        hour: 10,
        minute: 30,
        city: "Mumbai".to_string(),
        country: "India".to_string(),
        gender: Gender::Male,
    }
}

fn api_for(addr: SocketAddr) -> HttpApi {
    HttpApi::new(format!("http://{}/", addr), None).expect("client")
}

#[tokio::test]
async fn kundali_posts_birth_details() {
    let (addr, seen) = stub_backend(vec![Route {
        request_line: "POST /api/kundali/generate ",
        status: 200,
        body: json!({"analysis_text": "Gemini rising."}).to_string(),
    }])
    .await;
    let api = api_for(addr);

    let result = api.generate_kundali(&details()).await.expect("kundali");
    assert_eq!(result.analysis_text, "Gemini rising.");
    assert!(result.kundali_data.is_none());
    assert_eq!(result.insights().len(), 10);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    let body: Value = serde_json::from_str(&seen[0].1).unwrap();
    assert_eq!(
        body,
        json!({
            "year": 1990, "month": 6, "day": 15, "hour": 10, "minute": 30,
            "city": "Mumbai", "country": "India", "gender": "M"
        })
    );
}

#[tokio::test]
async fn error_detail_becomes_message() {
    let (addr, _seen) = stub_backend(vec![
        Route {
            request_line: "POST /api/kundali/generate ",
            status: 422,
            body: json!({"detail": "Unknown city"}).to_string(),
        },
        Route {
            request_line: "POST /api/chat ",
            status: 500,
            body: "oops".to_string(),
        },
    ])
    .await;
    let api = api_for(addr);

    match api.generate_kundali(&details()).await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Unknown city");
        }
        other => panic!("expected status error, got {:?}", other.map(|_| ())),
    }

    let request = ChatRequest {
        message: "hello".to_string(),
        conversation_history: Vec::new(),
        max_length: 150,
        birth_details: None,
    };
    match api.chat(&request).await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected status error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn horoscope_endpoints() {
    let (addr, seen) = stub_backend(vec![
        Route {
            request_line: "GET /api/horoscope/signs/leo/daily ",
            status: 200,
            body: json!({"horoscope": "Shine on."}).to_string(),
        },
        Route {
            request_line: "GET /api/horoscope/transits/current ",
            status: 200,
            body: json!({"transits": [
                {"planet": "Sun", "zodiac_sign": "Libra", "degree": 26.4, "house": 7, "is_retrograde": false},
                {"planet": "Saturn", "zodiac_sign": "Pisces", "degree": 18.1, "house": 12, "is_retrograde": true}
            ]})
            .to_string(),
        },
    ])
    .await;
    let api = api_for(addr);

    let daily = api.daily_horoscope(ZodiacSign::Leo).await.expect("daily");
    assert_eq!(daily.horoscope, "Shine on.");

    let transits = api.current_transits().await.expect("transits");
    assert_eq!(transits.len(), 2);
    assert!(transits.get("Saturn").is_some());

    let lines: Vec<String> = seen.lock().unwrap().iter().map(|(l, _)| l.clone()).collect();
    assert!(lines[0].starts_with("GET /api/horoscope/signs/leo/daily "));
    assert!(lines[1].starts_with("GET /api/horoscope/transits/current "));
}

#[tokio::test]
async fn recommendations_wrap_birth_details() {
    let (addr, seen) = stub_backend(vec![Route {
        request_line: "POST /api/recommendations/personalized ",
        status: 200,
        body: json!({"status": "error"}).to_string(),
    }])
    .await;
    let api = api_for(addr);

    let envelope = api
        .personalized_recommendations(&details())
        .await
        .expect("envelope");
    assert!(envelope.into_success().is_none());

    let body: Value = serde_json::from_str(&seen.lock().unwrap()[0].1).unwrap();
    assert_eq!(body["birth_details"]["city"], "Mumbai");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (addr, _seen) = stub_backend(vec![Route {
        request_line: "GET /api/horoscope/signs/aries/daily ",
        status: 200,
        body: "not json".to_string(),
    }])
    .await;
    let api = api_for(addr);

    assert!(matches!(
        api.daily_horoscope(ZodiacSign::Aries).await,
        Err(ApiError::Decode(_))
    ));
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let api = HttpApi::new("http://localhost:8000/", None).unwrap();
    assert_eq!(api.base_url(), "http://localhost:8000");
}
