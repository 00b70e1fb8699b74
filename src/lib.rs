//! # Item CRUD
//!
//! 一个最小的增删改查应用：
//! - `app`：Item 资源的模型、服务和 HTTP 处理器
//! - `core`：统一错误、响应和中间件
//! - `infrastructure`：配置、日志和记录存储（PostgreSQL / 内存）
//! - `server`：服务启动
//! - `client`：调用 REST 接口并维护列表和表单状态的控制器

pub mod app;
pub mod client;
pub mod core;
pub mod infrastructure;
pub mod server;
