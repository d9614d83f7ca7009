use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use common::types::ConversationKey;

const CODE_LEN: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowState {
    #[default]
    Idle,
    WaitingForCode {
        key_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    Start { key_name: String },
    CodeEntered(String),
    Cancel { key_name: String },
}

/// What the handler should do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    PromptCode { key_name: String },
    RejectCode { key_name: String },
    Activate { key_name: String, code: ActivationCode },
    ShowKey { key_name: String },
    /// Message is not for this flow
    Ignore,
}

pub fn transition(state: FlowState, event: FlowEvent) -> (FlowState, FlowAction) {
    match (state, event) {
        (_, FlowEvent::Start { key_name }) => (
            FlowState::WaitingForCode {
                key_name: key_name.clone(),
            },
            FlowAction::PromptCode { key_name },
        ),
        (_, FlowEvent::Cancel { key_name }) => (FlowState::Idle, FlowAction::ShowKey { key_name }),
        (FlowState::WaitingForCode { key_name }, FlowEvent::CodeEntered(text)) => {
            match ActivationCode::parse(&text) {
                Some(code) => (FlowState::Idle, FlowAction::Activate { key_name, code }),
                None => (
                    FlowState::WaitingForCode {
                        key_name: key_name.clone(),
                    },
                    FlowAction::RejectCode { key_name },
                ),
            }
        }
        (FlowState::Idle, FlowEvent::CodeEntered(_)) => (FlowState::Idle, FlowAction::Ignore),
    }
}

/// Code shown by the TV app: 5 alphanumeric characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationCode(String);

impl ActivationCode {
    pub fn parse(input: &str) -> Option<Self> {
        let code = input.trim();
        let valid =
            code.chars().count() == CODE_LEN && code.chars().all(char::is_alphanumeric);
        valid.then(|| Self(code.to_string()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flow state of every conversation, missing entries are [`FlowState::Idle`]
#[derive(Debug, Clone, Default)]
pub struct HappTvFlows {
    states: Arc<Mutex<HashMap<ConversationKey, FlowState>>>,
}

impl HappTvFlows {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn state(&self, key: &ConversationKey) -> FlowState {
        self.lock().get(key).cloned().unwrap_or_default()
    }
    pub fn is_waiting(&self, key: &ConversationKey) -> bool {
        self.lock().contains_key(key)
    }
    /// Apply `event` to the conversation and store the new state
    pub fn apply(&self, key: ConversationKey, event: FlowEvent) -> FlowAction {
        let mut states = self.lock();
        let state = states.remove(&key).unwrap_or_default();
        let (next, action) = transition(state, event);
        if next != FlowState::Idle {
            states.insert(key, next);
        }
        log::debug!("happ tv flow {key}: {action:?}");
        action
    }
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ConversationKey, FlowState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
