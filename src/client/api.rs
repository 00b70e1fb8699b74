//! Item REST 接口的客户端

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use crate::app::items::model::{CreateItemRequest, Item, UpdateItemRequest};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 控制器依赖的四个 REST 调用。写操作只看 HTTP 状态，不解析响应体
#[async_trait]
pub trait ItemsApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, ClientError>;
    async fn create(&self, req: &CreateItemRequest) -> Result<(), ClientError>;
    async fn update(&self, id: Uuid, req: &UpdateItemRequest) -> Result<(), ClientError>;
    async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}

/// 通过 HTTP 访问集合前缀，例如 `http://127.0.0.1:5000/api/items`
#[derive(Debug, Clone)]
pub struct HttpItemsApi {
    client: Client,
    base_url: String,
}

impl HttpItemsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

#[async_trait]
impl ItemsApi for HttpItemsApi {
    async fn list(&self) -> Result<Vec<Item>, ClientError> {
        let body = self
            .client
            .get(&self.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // 空响应体或 null 都当作空列表
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items: Option<Vec<Item>> = serde_json::from_str(&body)?;
        Ok(items.unwrap_or_default())
    }

    async fn create(&self, req: &CreateItemRequest) -> Result<(), ClientError> {
        self.client
            .post(&self.base_url)
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update(&self, id: Uuid, req: &UpdateItemRequest) -> Result<(), ClientError> {
        self.client
            .put(self.item_url(id))
            .json(req)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        self.client
            .delete(self.item_url(id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
