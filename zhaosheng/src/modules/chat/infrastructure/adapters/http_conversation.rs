// HTTP Conversation Adapter - Admissions Conversation Service
//
// 通过 JSON over HTTP 访问后端的三个端点

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::modules::chat::ports::{
    ChatReply, ConversationError, ConversationPort, ConversationServiceConfig, EligibilityQuery,
    EligibilityReport,
};

/// 聊天请求
#[derive(Debug, Serialize)]
struct ChatWireRequest<'a> {
    message: &'a str,
}

/// 聊天响应
#[derive(Debug, Deserialize)]
struct ChatWireResponse {
    response: String,
    #[serde(default)]
    show_eligibility_form: bool,
}

impl From<ChatWireResponse> for ChatReply {
    fn from(wire: ChatWireResponse) -> Self {
        Self {
            text: wire.response,
            show_eligibility_form: wire.show_eligibility_form,
        }
    }
}

/// 资格核查请求
#[derive(Debug, Serialize)]
struct EligibilityWireRequest<'a> {
    level: &'a str,
    gpa: &'a str,
    test_type: &'a str,
    test_score: &'a str,
}

/// 资格核查响应
#[derive(Debug, Deserialize)]
struct EligibilityWireResponse {
    status: String,
    #[serde(default)]
    eligible: bool,
    message: String,
}

impl EligibilityWireResponse {
    /// status 为 "success" 才算判定完成，其余一律按业务拒绝处理
    fn into_report(self) -> EligibilityReport {
        if self.status == "success" {
            EligibilityReport::Assessed {
                eligible: self.eligible,
                message: self.message,
            }
        } else {
            EligibilityReport::Rejected {
                message: self.message,
            }
        }
    }
}

/// 会话服务 HTTP 适配器
pub struct HttpConversationAdapter {
    config: ConversationServiceConfig,
    client: Client,
}

impl HttpConversationAdapter {
    pub fn new(config: ConversationServiceConfig) -> Result<Self, ConversationError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConversationError::Unknown(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// 发送请求并解码响应体。
    /// 不检查 HTTP 状态码：只要响应体能按约定结构解码就按成功处理，
    /// 服务端在非 2xx 状态下返回的结构化错误体也能走到业务错误分支
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ConversationError>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ConversationError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ConversationError::Network(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            if status.is_success() {
                ConversationError::Parse(e.to_string())
            } else {
                ConversationError::Api {
                    code: status.to_string(),
                    message: text,
                }
            }
        })
    }
}

#[async_trait]
impl ConversationPort for HttpConversationAdapter {
    async fn send_message(&self, message: &str) -> Result<ChatReply, ConversationError> {
        let wire: ChatWireResponse = self
            .post_json("/chat", &ChatWireRequest { message })
            .await?;

        Ok(wire.into())
    }

    async fn check_eligibility(
        &self,
        query: &EligibilityQuery,
    ) -> Result<EligibilityReport, ConversationError> {
        let request = EligibilityWireRequest {
            level: &query.level,
            gpa: &query.gpa,
            test_type: &query.test_type,
            test_score: &query.test_score,
        };
        let wire: EligibilityWireResponse = self.post_json("/check-eligibility", &request).await?;

        Ok(wire.into_report())
    }

    async fn reset(&self) -> Result<(), ConversationError> {
        // 空请求体，响应体无论内容如何都忽略
        self.client
            .post(self.endpoint("/reset"))
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| ConversationError::Network(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_without_form_flag_defaults_to_hidden() {
        let wire: ChatWireResponse =
            serde_json::from_str(r#"{"response": "Hello there"}"#).unwrap();
        let reply: ChatReply = wire.into();

        assert_eq!(reply.text, "Hello there");
        assert!(!reply.show_eligibility_form);
    }

    #[test]
    fn test_chat_response_with_form_flag() {
        let wire: ChatWireResponse = serde_json::from_str(
            r#"{"response": "Let's check your eligibility!", "show_eligibility_form": true}"#,
        )
        .unwrap();
        let reply: ChatReply = wire.into();

        assert!(reply.show_eligibility_form);
    }

    #[test]
    fn test_chat_error_body_does_not_decode() {
        // 服务端异常时返回 {"error": ...}，缺少 response 字段，按解码失败处理
        let result = serde_json::from_str::<ChatWireResponse>(r#"{"error": "boom"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_eligibility_success_body_maps_to_assessed() {
        // 服务端成功响应带有额外的 programs 字段，解码时忽略
        let wire: EligibilityWireResponse = serde_json::from_str(
            r#"{
                "status": "success",
                "eligible": true,
                "programs": ["Computer Science"],
                "message": "✅ You are eligible for: Computer Science"
            }"#,
        )
        .unwrap();

        assert_eq!(
            wire.into_report(),
            EligibilityReport::Assessed {
                eligible: true,
                message: "✅ You are eligible for: Computer Science".to_string(),
            }
        );
    }

    #[test]
    fn test_eligibility_error_status_maps_to_rejected() {
        let wire: EligibilityWireResponse = serde_json::from_str(
            r#"{"status": "error", "message": "Please enter valid numerical values."}"#,
        )
        .unwrap();

        assert_eq!(
            wire.into_report(),
            EligibilityReport::Rejected {
                message: "Please enter valid numerical values.".to_string(),
            }
        );
    }

    #[test]
    fn test_eligibility_request_uses_snake_case_keys() {
        let request = EligibilityWireRequest {
            level: "undergraduate",
            gpa: "3.4",
            test_type: "sat",
            test_score: "1280",
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["level"], "undergraduate");
        assert_eq!(value["test_type"], "sat");
        assert_eq!(value["test_score"], "1280");
    }

    #[test]
    fn test_endpoint_joins_base_url_with_trailing_slash() {
        let adapter = HttpConversationAdapter::new(ConversationServiceConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(adapter.endpoint("/chat"), "http://localhost:5000/chat");
    }
}
