//! 会话模块
//!
//! 令牌不再由各处直接读写浏览器存储，而是由显式的 [`Session`] 持有：
//! 登录时写入，登出时清除，路由守卫与网关从这里读取。

use std::cell::RefCell;

use crate::api::AuthGateway;
use crate::error::{FailureKind, Notice};
use crate::request::HttpClient;

/// 令牌持久化
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    /// 返回是否写入成功
    fn save(&self, token: &str) -> bool;
    fn clear(&self) -> bool;
}

/// 内存实现，页面刷新即失效
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> bool {
        *self.token.borrow_mut() = Some(token.to_string());
        true
    }

    fn clear(&self) -> bool {
        *self.token.borrow_mut() = None;
        true
    }
}

/// 会话状态
#[derive(Debug)]
pub struct Session<S: TokenStore> {
    store: S,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    /// 从存储中恢复会话（页面加载时调用）
    pub fn restore(store: S) -> Self {
        let token = store.load().filter(|t| !t.trim().is_empty());
        Self { store, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 登录成功：持久化并持有令牌
    pub fn begin(&mut self, token: String) {
        if !self.store.save(&token) {
            log::warn!("token could not be persisted; session lasts until reload");
        }
        self.token = Some(token);
    }

    /// 登出：清除内存与存储中的令牌
    pub fn end(&mut self) {
        if !self.store.clear() {
            log::warn!("stored token could not be removed");
        }
        self.token = None;
    }
}

/// 用凭据换取令牌，成功后由调用方 [`Session::begin`]
///
/// 空用户名或空密码不会发出请求；用户名只在判空时去除空白，发送时保持原样。
/// 所有失败都归结为同一条登录错误提示。
pub async fn authenticate<C: HttpClient>(
    gateway: &AuthGateway<C>,
    username: &str,
    password: &str,
) -> Result<String, Notice> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(Notice::Error(FailureKind::Login));
    }

    match gateway.login(username, password).await {
        Ok(resp) if !resp.access_token.is_empty() => {
            log::info!("login succeeded for {}", username);
            Ok(resp.access_token)
        }
        Ok(_) => {
            log::error!("login for {} returned an empty token", username);
            Err(Notice::Error(FailureKind::Login))
        }
        Err(e) => {
            log::error!("login failed: {}", e);
            Err(Notice::Error(FailureKind::Login))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;

    const AUTH: &str = "http://localhost:8000/api";

    #[test]
    fn restore_reads_stored_token() {
        let session = Session::restore(MemoryTokenStore::with_token("abc"));
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc"));

        let blank = Session::restore(MemoryTokenStore::with_token("  "));
        assert!(!blank.is_authenticated());
    }

    #[test]
    fn begin_and_end_drive_the_store() {
        let mut session = Session::restore(MemoryTokenStore::new());
        assert!(!session.is_authenticated());

        session.begin("t1".into());
        assert_eq!(session.store.load().as_deref(), Some("t1"));

        session.end();
        assert!(!session.is_authenticated());
        assert_eq!(session.store.load(), None);
    }

    #[tokio::test]
    async fn login_persists_token() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://localhost:8000/api/auth/login?username=ana&password=123",
            200,
            json!({ "access_token": "jwt-1" }),
        );
        let gateway = AuthGateway::new(&client, AUTH);
        let mut session = Session::restore(MemoryTokenStore::new());

        let token = authenticate(&gateway, "ana", "123").await.unwrap();
        session.begin(token);

        assert_eq!(session.token(), Some("jwt-1"));
        assert_eq!(session.store.load().as_deref(), Some("jwt-1"));
    }

    #[tokio::test]
    async fn rejected_credentials_give_login_notice() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://localhost:8000/api/auth/login?username=ana&password=bad",
            401,
            json!({ "detail": "Invalid credentials" }),
        );
        let gateway = AuthGateway::new(&client, AUTH);

        let notice = authenticate(&gateway, "ana", "bad").await.unwrap_err();

        assert_eq!(notice.message(), "Usuário ou senha inválidos");
    }

    #[tokio::test]
    async fn username_is_sent_as_typed() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://localhost:8000/api/auth/login?username=+ana+&password=123",
            200,
            json!({ "access_token": "jwt-2" }),
        );
        let gateway = AuthGateway::new(&client, AUTH);

        let token = authenticate(&gateway, " ana ", "123").await.unwrap();

        assert_eq!(token, "jwt-2");
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn blank_credentials_skip_the_network() {
        let client = MockHttpClient::new();
        let gateway = AuthGateway::new(&client, AUTH);

        let res = authenticate(&gateway, "   ", "x").await;

        assert_eq!(res, Err(Notice::Error(FailureKind::Login)));
        assert_eq!(client.request_count(), 0);
    }
}
