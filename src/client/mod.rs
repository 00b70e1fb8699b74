//! 客户端：REST 调用、视图控制器、终端渲染

pub mod api;
pub mod command;
pub mod controller;
pub mod view;

pub use api::{ClientError, HttpItemsApi, ItemsApi};
pub use controller::{Confirm, ItemController, ItemForm, ViewState};
