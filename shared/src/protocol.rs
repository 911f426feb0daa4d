use crate::{AUTH_LOGIN_PATH, LoginResponse, PEDIDOS_PATH, Pedido, PedidoPayload};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the response body carries `Response`; when false the body is ignored.
    const EXPECTS_BODY: bool = true;

    /// The URL path, relative to the service base URL.
    fn path(&self) -> String;

    /// JSON body, if the endpoint takes one.
    fn body(&self) -> Option<&PedidoPayload> {
        None
    }

    /// Query string pairs, sent unencoded here; the transport encodes them.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Request Definitions
// =========================================================

/// `/pedidos/{id}` with the id percent-encoded as one path segment,
/// so `/`, `?` and `#` inside an id never change the target resource.
fn item_path(id: &str) -> String {
    // form encoding writes spaces as `+`; a literal `+` is already `%2B`
    let segment: String = url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("{}{}", PEDIDOS_PATH, segment)
}

/// List all orders
#[derive(Debug)]
pub struct ListPedidos;

impl ApiRequest for ListPedidos {
    type Response = Vec<Pedido>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PEDIDOS_PATH.to_string()
    }
}

/// Create an order; the server assigns the id
#[derive(Debug)]
pub struct CreatePedido(pub PedidoPayload);

impl ApiRequest for CreatePedido {
    type Response = Pedido;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PEDIDOS_PATH.to_string()
    }

    fn body(&self) -> Option<&PedidoPayload> {
        Some(&self.0)
    }
}

/// Replace the fields of an existing order
#[derive(Debug)]
pub struct UpdatePedido {
    pub id: String,
    pub payload: PedidoPayload,
}

impl ApiRequest for UpdatePedido {
    // Some backends answer 204, so the body is optional.
    type Response = Option<Pedido>;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        item_path(&self.id)
    }

    fn body(&self) -> Option<&PedidoPayload> {
        Some(&self.payload)
    }
}

/// Delete an order by id
#[derive(Debug)]
pub struct DeletePedido {
    pub id: String,
}

impl ApiRequest for DeletePedido {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const EXPECTS_BODY: bool = false;

    fn path(&self) -> String {
        item_path(&self.id)
    }
}

/// Exchange credentials for a bearer token.
/// Credentials travel in the query string with an empty body.
#[derive(Debug)]
pub struct Login {
    pub username: String,
    pub password: String,
}

impl ApiRequest for Login {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        AUTH_LOGIN_PATH.to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("password", self.password.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths_append_id_to_collection() {
        let del = DeletePedido { id: "42".into() };
        assert_eq!(del.path(), "/pedidos/42");
        assert_eq!(DeletePedido::METHOD, HttpMethod::Delete);
        assert_eq!(ListPedidos.path(), "/pedidos/");
    }

    #[test]
    fn ids_are_encoded_as_a_single_segment() {
        let del = DeletePedido { id: "1?x=2".into() };
        assert_eq!(del.path(), "/pedidos/1%3Fx%3D2");

        let upd = UpdatePedido {
            id: "a/b#c d+e".into(),
            payload: PedidoPayload {
                cliente: "Ana".into(),
                valor: 1.0,
                descricao: "x".into(),
            },
        };
        assert_eq!(upd.path(), "/pedidos/a%2Fb%23c%20d%2Be");

        // uuid-like ids are left alone
        let plain = DeletePedido { id: "srv-9_a.b".into() };
        assert_eq!(plain.path(), "/pedidos/srv-9_a.b");
    }

    #[test]
    fn login_uses_query_not_body() {
        let req = Login {
            username: "ana".into(),
            password: "s3nha".into(),
        };
        assert!(req.body().is_none());
        assert_eq!(
            req.query(),
            vec![("username", "ana".to_string()), ("password", "s3nha".to_string())]
        );
    }
}
