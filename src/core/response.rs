//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 只带一句提示的响应体，例如 `{"message": "Item deleted"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
