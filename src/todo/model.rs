//! Wire representation of todos and translation to backend messages.

use serde::{Deserialize, Serialize};

use crate::backend::proto;

/// A todo as seen by HTTP callers.
///
/// Every field is optional on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub owner: String,
    pub done: bool,
}

impl Todo {
    /// Backend message for this todo, owned by `owner`.
    ///
    /// The wire `owner` is ignored; ownership is decided by the gateway.
    pub fn to_backend(&self, owner: &str) -> proto::Todo {
        proto::Todo {
            id: self.id.clone(),
            owner: owner.to_string(),
            text: self.text.clone(),
            done: self.done,
        }
    }
}

impl From<proto::Todo> for Todo {
    fn from(todo: proto::Todo) -> Self {
        Self {
            id: todo.id,
            text: todo.text,
            owner: todo.owner,
            done: todo.done,
        }
    }
}

/// Acknowledgement returned for a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
}

impl From<proto::DeleteTodoRes> for DeleteAck {
    fn from(res: proto::DeleteTodoRes) -> Self {
        Self {
            success: res.success,
        }
    }
}
