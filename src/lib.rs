//! trans-web - AI智能翻译助手核心库
//!
//! 这个库提供了翻译请求控制器、远程翻译服务客户端和终端渲染等核心功能。

pub mod api_constants;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod stats;
pub mod translator;
pub mod utils;

pub use controller::{RequestState, Snapshot, SubmitOutcome, TranslationRequestController};
pub use error::TranslationError;
pub use translator::{HttpTranslator, RemoteTranslator, TranslationResult};
