//! 订单管理客户端核心
//!
//! 与平台无关的部分：HTTP 抽象、REST 网关、会话、看板状态。
//! 浏览器相关的实现（fetch、LocalStorage、路由）位于 `pedidos-frontend`。

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod request;
pub mod session;

pub use api::{AuthGateway, PedidosGateway};
pub use board::{PedidoBoard, PedidoForm, SubmitError, SubmitOutcome, SubmitPlan, Totals};
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult, FailureKind, Notice, SuccessKind};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use session::{MemoryTokenStore, Session, TokenStore};

pub use pedidos_shared as shared;
