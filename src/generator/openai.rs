//! Chat-completions client for the question service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::payload::parse_questions;
use super::{GenerationError, QuestionSource};
use crate::config::Config;
use crate::models::{Category, QuestionCount, QuestionSet};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Generates questions through an OpenAI-compatible chat-completions API.
pub struct OpenAiSource {
    client: reqwest::Client,
    config: Config,
}

impl OpenAiSource {
    /// Build a client. The configured timeout bounds each request.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }

    fn request_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.config.request_timeout)
        } else {
            GenerationError::Request(err)
        }
    }
}

/// The user message asking for `count` questions on `category`.
pub(crate) fn user_prompt(category: Category, count: QuestionCount) -> String {
    format!(
        "Topic: {}\nNumber of questions (N): {}\nReturn ONLY JSON.",
        category.topic(),
        count
    )
}

fn build_request(config: &Config, category: Category, count: QuestionCount) -> ChatRequest<'_> {
    ChatRequest {
        model: &config.model_name,
        temperature: config.temperature,
        messages: vec![
            ChatMessage {
                role: "system",
                content: config.system_prompt.clone(),
            },
            ChatMessage {
                role: "user",
                content: user_prompt(category, count),
            },
        ],
    }
}

fn completion_content(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerationError::EmptyCompletion)
}

#[async_trait]
impl QuestionSource for OpenAiSource {
    async fn generate_questions(
        &self,
        category: Category,
        count: QuestionCount,
    ) -> Result<QuestionSet, GenerationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(GenerationError::MissingCredentials);
        };

        let request = build_request(&self.config, category, count);
        debug!(model = %self.config.model_name, category = %category, count = count.get(), "requesting questions");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.request_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.request_error(err))?;
        let content = completion_content(&body)?;
        parse_questions(&content, count)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{Value, json};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    fn count(n: usize) -> QuestionCount {
        QuestionCount::new(n).unwrap()
    }

    fn questions_json(n: usize) -> String {
        let questions: Vec<Value> = (0..n)
            .map(|i| {
                json!({
                    "question": format!("Which monster is number {i}?"),
                    "options": ["Vampire", "Werewolf", "Zombie", "Banshee"],
                    "correct_index": 1
                })
            })
            .collect();
        json!({ "questions": questions }).to_string()
    }

    fn completion_body(content: &str) -> String {
        json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
        })
        .to_string()
    }

    /// Serve a single canned HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });

        (base, handle)
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&data);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn source_for(config: Config) -> OpenAiSource {
        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(config.request_timeout)
            .build()
            .unwrap();
        OpenAiSource::with_client(client, config)
    }

    fn config_for(base: &str) -> Config {
        Config {
            api_key: Some("sk-test".to_string()),
            api_base: base.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_request_body_shape() {
        let config = Config::default();
        let request = build_request(&config, Category::MonstersAndCreatures, count(5));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-5-nano");
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], config.system_prompt.as_str());
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(
            value["messages"][1]["content"],
            "Topic: famous monsters, vampires, werewolves, zombies, ghosts\nNumber of questions (N): 5\nReturn ONLY JSON."
        );
    }

    #[test]
    fn test_completion_content() {
        assert_eq!(completion_content(&completion_body("hi")).unwrap(), "hi");
        assert!(matches!(
            completion_content(r#"{"choices": []}"#),
            Err(GenerationError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_content(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(GenerationError::EmptyCompletion)
        ));
        assert!(matches!(
            completion_content("<html>"),
            Err(GenerationError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credentials_skips_network() {
        let source = OpenAiSource::new(Config::default()).unwrap();
        let err = source
            .generate_questions(Category::GeneralHalloween, count(5))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerationError::MissingCredentials));
        assert_eq!(err.to_string(), "missing credentials");
    }

    #[tokio::test]
    async fn test_generates_questions_from_service() {
        let (base, server) = serve_once("200 OK", completion_body(&questions_json(7))).await;
        let source = source_for(config_for(&base));

        let set = source
            .generate_questions(Category::MonstersAndCreatures, count(5))
            .await
            .unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(set.get(0).unwrap().correct_option(), "Werewolf");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(request.contains("\"model\":\"gpt-5-nano\""));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, _server) = serve_once("500 Internal Server Error", "{}".to_string()).await;
        let source = source_for(config_for(&base));

        let err = source
            .generate_questions(Category::HauntedPlaces, count(5))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Status(500)));
    }

    #[tokio::test]
    async fn test_short_reply_is_insufficient() {
        let (base, _server) = serve_once("200 OK", completion_body(&questions_json(2))).await;
        let source = source_for(config_for(&base));

        let err = source
            .generate_questions(Category::HauntedPlaces, count(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InsufficientQuestions { valid: 2, requested: 5 }
        ));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/v1", listener.local_addr().unwrap());
        let _server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let _ = read_request(&mut stream).await;
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let config = Config {
            request_timeout: Duration::from_millis(200),
            ..config_for(&base)
        };
        let source = source_for(config);

        let err = source
            .generate_questions(Category::UrbanLegends, count(5))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(_)));
    }
}
