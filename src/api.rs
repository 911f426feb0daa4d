use pedidos_shared::protocol::{
    ApiRequest, CreatePedido, DeletePedido, ListPedidos, Login, UpdatePedido,
};
use pedidos_shared::{HEADER_AUTHORIZATION, LoginResponse, Pedido, PedidoPayload};

use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::request::{HttpClient, HttpRequest};

// =========================================================
// 通用执行器
// =========================================================

/// 拼接基础地址与路径，基础地址末尾的 `/` 会被去掉
fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// 根据 `ApiRequest` 描述构建请求、发送并解析响应
async fn execute<C: HttpClient, R: ApiRequest>(
    client: &C,
    base_url: &str,
    bearer: Option<&str>,
    req: &R,
) -> ApiResult<R::Response> {
    let url = join_url(base_url, &req.path());
    let query = req.query();

    let mut http = HttpRequest::new(&url, R::METHOD)
        .with_query(query.iter().map(|(k, v)| (*k, v.as_str())))
        .with_header("Accept", "application/json");

    if let Some(token) = bearer {
        http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
    }
    if let Some(body) = req.body() {
        http = http.with_json(body)?;
    }

    log::debug!("{} {}", R::METHOD.as_str(), url);
    let resp = client.send(http).await?;

    if !resp.is_success() {
        return Err(ApiError::status(
            resp.status,
            format!("{} {} -> {}", R::METHOD.as_str(), url, resp.status),
        ));
    }

    if R::EXPECTS_BODY {
        resp.json::<R::Response>()
    } else {
        serde_json::from_str::<R::Response>("null").map_err(ApiError::from)
    }
}

// =========================================================
// 业务网关: 订单
// =========================================================

/// 订单 REST 接口
///
/// 对应 `GET/POST /pedidos/` 与 `PUT/DELETE /pedidos/{id}`。
#[derive(Clone)]
pub struct PedidosGateway<C> {
    client: C,
    base_url: String,
    bearer: Option<String>,
}

impl<C: HttpClient> PedidosGateway<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            bearer: None,
        }
    }

    /// 附加 `Authorization: Bearer` 头；传入 `None` 则不附加
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        execute(&self.client, &self.base_url, self.bearer.as_deref(), req).await
    }

    /// 获取全部订单
    pub async fn list(&self) -> ApiResult<Vec<Pedido>> {
        self.call(&ListPedidos).await.map_err(|e| e.in_op("pedidos.list"))
    }

    /// 创建订单，返回服务端分配了 id 的订单
    pub async fn create(&self, payload: PedidoPayload) -> ApiResult<Pedido> {
        self.call(&CreatePedido(payload))
            .await
            .map_err(|e| e.in_op("pedidos.create"))
    }

    /// 更新订单
    ///
    /// 服务端返回订单时原样交回；响应为空或不是订单结构时返回 `None`。
    pub async fn update(&self, id: &str, payload: PedidoPayload) -> ApiResult<Option<Pedido>> {
        let req = UpdatePedido {
            id: id.to_string(),
            payload,
        };
        match self.call(&req).await {
            Ok(updated) => Ok(updated),
            Err(e) if e.kind == ApiErrorKind::Parse => {
                log::warn!("PUT /pedidos/{} returned an unrecognised body: {}", id, e);
                Ok(None)
            }
            Err(e) => Err(e.in_op_with("pedidos.update", id)),
        }
    }

    /// 删除订单
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let req = DeletePedido { id: id.to_string() };
        self.call(&req)
            .await
            .map_err(|e| e.in_op_with("pedidos.delete", id))
    }
}

// =========================================================
// 业务网关: 认证
// =========================================================

/// 登录接口，通常与订单接口不在同一主机/端口
#[derive(Clone)]
pub struct AuthGateway<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> AuthGateway<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// 用户名和密码以查询参数发送，请求体为空
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let req = Login {
            username: username.to_string(),
            password: password.to_string(),
        };
        execute(&self.client, &self.base_url, None, &req)
            .await
            .map_err(|e| e.in_op_with("auth.login", username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;

    const BASE: &str = "http://127.0.0.1:8000/api";

    fn payload() -> PedidoPayload {
        PedidoPayload {
            cliente: "Ana".into(),
            valor: 10.0,
            descricao: "x".into(),
        }
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://h/api/", "/pedidos/"), "http://h/api/pedidos/");
        assert_eq!(join_url("http://h/api", "pedidos/1"), "http://h/api/pedidos/1");
    }

    #[tokio::test]
    async fn list_hits_collection_endpoint() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            "http://127.0.0.1:8000/api/pedidos/",
            200,
            json!([{ "id": "1", "cliente": "Ana", "valor": 10, "descricao": "x" }]),
        );

        let gateway = PedidosGateway::new(&client, BASE);
        let list = gateway.list().await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list[0].cliente(), "Ana");
        let req = client.last_request().unwrap();
        assert!(!req.headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn create_posts_json_body() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://127.0.0.1:8000/api/pedidos/",
            201,
            json!({ "id": "abc", "cliente": "Ana", "valor": 10.0, "descricao": "x" }),
        );

        let gateway = PedidosGateway::new(&client, BASE);
        let created = gateway.create(payload()).await.unwrap();

        assert_eq!(created.id, "abc");
        let req = client.last_request().unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "cliente": "Ana", "valor": 10.0, "descricao": "x" }));
    }

    #[tokio::test]
    async fn update_tolerates_empty_and_foreign_bodies() {
        let client = MockHttpClient::new();
        let url = "http://127.0.0.1:8000/api/pedidos/7";
        let gateway = PedidosGateway::new(&client, BASE);

        client.mock_raw(HttpMethod::Put, url, 204, "");
        assert_eq!(gateway.update("7", payload()).await.unwrap(), None);

        client.mock_response(HttpMethod::Put, url, 200, json!({ "message": "ok" }));
        assert_eq!(gateway.update("7", payload()).await.unwrap(), None);

        client.mock_response(
            HttpMethod::Put,
            url,
            200,
            json!({ "id": 7, "cliente": "Ana", "valor": "11.00", "descricao": "y" }),
        );
        let updated = gateway.update("7", payload()).await.unwrap().unwrap();
        assert_eq!(updated.descricao(), "y");
    }

    #[tokio::test]
    async fn delete_ignores_body_and_reports_status() {
        let client = MockHttpClient::new();
        let gateway = PedidosGateway::new(&client, BASE);

        client.mock_response(
            HttpMethod::Delete,
            "http://127.0.0.1:8000/api/pedidos/1",
            200,
            json!({ "detail": "deleted" }),
        );
        gateway.delete("1").await.unwrap();

        // 未预设的地址返回 404
        let err = gateway.delete("2").await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.spans()[0].operation, "pedidos.delete");
    }

    #[tokio::test]
    async fn delete_keeps_reserved_characters_inside_the_id() {
        let client = MockHttpClient::new();
        let gateway = PedidosGateway::new(&client, BASE);

        let _ = gateway.delete("1?x=2").await;
        assert_eq!(
            client.last_request().unwrap().url,
            "http://127.0.0.1:8000/api/pedidos/1%3Fx%3D2"
        );

        let _ = gateway.update("a/b#c", payload()).await;
        assert_eq!(
            client.last_request().unwrap().url,
            "http://127.0.0.1:8000/api/pedidos/a%2Fb%23c"
        );
    }

    #[tokio::test]
    async fn bearer_header_is_explicit() {
        let client = MockHttpClient::new();
        let gateway = PedidosGateway::new(&client, BASE).with_bearer(Some("tok".into()));
        let _ = gateway.list().await;

        let req = client.last_request().unwrap();
        assert_eq!(
            req.headers.get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn login_sends_credentials_in_query() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://localhost:8000/api/auth/login?username=ana&password=p%40ss",
            200,
            json!({ "access_token": "jwt", "token_type": "bearer" }),
        );

        let gateway = AuthGateway::new(&client, "http://localhost:8000/api");
        let resp = gateway.login("ana", "p@ss").await.unwrap();

        assert_eq!(resp.access_token, "jwt");
        assert!(client.last_request().unwrap().body.is_none());
    }
}
