//! Scripted gateway doubles shared by the use-case tests

use crate::ports::completion_gateway::{
    Completion, CompletionGateway, CompletionRequest, GatewayError,
};
use async_trait::async_trait;
use calcouncil_domain::TokenUsage;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted step: a canned reply or a canned failure
pub enum Scripted {
    Reply(&'static str),
    Fail,
}

/// Gateway that replays a fixed script of replies, recording every request.
///
/// When the script runs dry, the `repeat` reply (if set) answers everything
/// else; otherwise further calls fail as an outage.
pub struct ScriptedGateway {
    script: Mutex<VecDeque<Scripted>>,
    repeat: Option<&'static str>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from(script)),
            repeat: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A gateway that answers every request with the same reply
    pub fn repeating(reply: &'static str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        self.requests.lock().unwrap().push(request);

        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Scripted::Reply(text)) => Ok(Completion {
                text: text.to_string(),
                usage: TokenUsage::new(10, 20, 30),
                model_echoed: None,
            }),
            Some(Scripted::Fail) => Err(GatewayError::Unavailable("scripted outage".to_string())),
            None => match self.repeat {
                Some(text) => Ok(Completion {
                    text: text.to_string(),
                    usage: TokenUsage::new(10, 20, 30),
                    model_echoed: None,
                }),
                None => Err(GatewayError::Unavailable("script exhausted".to_string())),
            },
        }
    }
}
