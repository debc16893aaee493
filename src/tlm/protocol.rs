use std::fmt;

use crate::error::TransportError;

/// Identifies one interrupt line.
pub type LineId = u32;

/// General shape of a transport request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TlmKind {
    Read,
    Write,
}

/// Raw action word as carried by a request. Only the associated constants
/// decode to an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionCode(pub u8);

impl ActionCode {
    pub const QUERY: ActionCode = ActionCode(0);
    pub const ASSERT: ActionCode = ActionCode(1);
    pub const CLEAR: ActionCode = ActionCode(2);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Assert,
    Clear,
    Query,
}

impl Action {
    /// assert and clear change line state, query only observes it
    pub fn kind(&self) -> TlmKind {
        match self {
            Action::Assert | Action::Clear => TlmKind::Write,
            Action::Query => TlmKind::Read,
        }
    }
}

impl TryFrom<ActionCode> for Action {
    type Error = TransportError;

    fn try_from(code: ActionCode) -> Result<Self, Self::Error> {
        match code {
            ActionCode::QUERY => Ok(Action::Query),
            ActionCode::ASSERT => Ok(Action::Assert),
            ActionCode::CLEAR => Ok(Action::Clear),
            ActionCode(other) => Err(TransportError::MalformedRequest(other)),
        }
    }
}

impl From<Action> for ActionCode {
    fn from(action: Action) -> Self {
        match action {
            Action::Query => ActionCode::QUERY,
            Action::Assert => ActionCode::ASSERT,
            Action::Clear => ActionCode::CLEAR,
        }
    }
}

// MESSAGE TYPES

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterruptRequest {
    pub target_id: LineId,
    pub action: ActionCode,
    /// level/vector for assert; ignored otherwise
    pub payload: u32,
}

impl InterruptRequest {
    pub fn new(target_id: LineId, action: impl Into<ActionCode>, payload: u32) -> Self {
        Self { target_id, action: action.into(), payload }
    }
    pub fn assert(target_id: LineId, level: u32) -> Self {
        Self::new(target_id, Action::Assert, level)
    }
    pub fn clear(target_id: LineId) -> Self {
        Self::new(target_id, Action::Clear, 0)
    }
    pub fn query(target_id: LineId) -> Self {
        Self::new(target_id, Action::Query, 0)
    }
    pub fn decode(&self) -> Result<Action, TransportError> {
        Action::try_from(self.action)
    }
}

impl fmt::Display for InterruptRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            Ok(action) => write!(f, "{:?}(line={}, payload={})", action, self.target_id, self.payload),
            Err(_) => write!(f, "Action#{}(line={}, payload={})", self.action.0, self.target_id, self.payload),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterruptResponse {
    pub status: Status,
    /// `None` whenever `status` is `Error`
    pub payload: Option<u32>,
}

impl InterruptResponse {
    pub fn ok(payload: u32) -> Self {
        Self { status: Status::Ok, payload: Some(payload) }
    }
    pub fn error() -> Self {
        Self { status: Status::Error, payload: None }
    }
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}

impl fmt::Display for InterruptResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload {
            Some(p) if self.is_ok() => write!(f, "OK({})", p),
            _ => write!(f, "ERROR"),
        }
    }
}
