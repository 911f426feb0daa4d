//! 订单看板状态
//!
//! 列表、表单、编辑目标、过滤字符串和提示信息都集中在 [`PedidoBoard`] 中。
//! 每个网络操作拆成 "准备 -> 请求 -> 应用" 三步：准备与应用是同步的纯状态变换，
//! 请求由网关完成。这样界面层可以在两步之间释放对状态的借用。
//!
//! 本地状态只在服务端确认后才更新；变更成功后直接修补本地列表，不重新拉取。

use pedidos_shared::csv::to_csv;
use pedidos_shared::filter::{FilterScope, filter_pedidos};
use pedidos_shared::{Pedido, PedidoPayload};

use crate::api::PedidosGateway;
use crate::error::{ApiError, ApiResult, FailureKind, Notice, SuccessKind};
use crate::request::HttpClient;

// =========================================================
// 表单
// =========================================================

/// 表单字段（原始输入文本）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PedidoForm {
    pub cliente: String,
    pub valor: String,
    pub descricao: String,
}

/// 解析金额，接受 `,` 作为小数点
fn parse_valor(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

impl PedidoForm {
    pub fn from_pedido(pedido: &Pedido) -> Self {
        Self {
            cliente: pedido.cliente().to_string(),
            valor: pedido.valor().to_string(),
            descricao: pedido.descricao().to_string(),
        }
    }

    /// 三个字段都必须非空，金额必须是数字
    pub fn validate(&self) -> Result<PedidoPayload, Notice> {
        let cliente = self.cliente.trim();
        let valor = self.valor.trim();
        let descricao = self.descricao.trim();

        if cliente.is_empty() || valor.is_empty() || descricao.is_empty() {
            return Err(Notice::Error(FailureKind::Validation));
        }

        let valor = parse_valor(valor).ok_or(Notice::Error(FailureKind::InvalidAmount))?;

        Ok(PedidoPayload {
            cliente: cliente.to_string(),
            valor,
            descricao: descricao.to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// =========================================================
// 提交计划与结果
// =========================================================

/// 通过校验后要执行的请求
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitPlan {
    Create(PedidoPayload),
    Update { id: String, payload: PedidoPayload },
}

/// 服务端确认后的结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Pedido),
    Updated {
        id: String,
        payload: PedidoPayload,
        /// 服务端返回的订单（如果有）
        server: Option<Pedido>,
    },
}

/// 提交失败，记录失败请求所针对的订单（新建时为 `None`）
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitError {
    pub target: Option<String>,
    pub error: ApiError,
}

impl SubmitPlan {
    /// 新建时为 `None`
    pub fn target(&self) -> Option<&str> {
        match self {
            SubmitPlan::Create(_) => None,
            SubmitPlan::Update { id, .. } => Some(id),
        }
    }

    pub async fn execute<C: HttpClient>(
        self,
        gateway: &PedidosGateway<C>,
    ) -> Result<SubmitOutcome, SubmitError> {
        match self {
            SubmitPlan::Create(payload) => gateway
                .create(payload)
                .await
                .map(SubmitOutcome::Created)
                .map_err(|error| SubmitError {
                    target: None,
                    error,
                }),
            SubmitPlan::Update { id, payload } => match gateway.update(&id, payload.clone()).await {
                Ok(server) => Ok(SubmitOutcome::Updated {
                    id,
                    payload,
                    server,
                }),
                Err(error) => Err(SubmitError {
                    target: Some(id),
                    error,
                }),
            },
        }
    }
}

/// 列表汇总
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub count: usize,
    pub valor: f64,
}

// =========================================================
// 看板
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct PedidoBoard {
    pedidos: Vec<Pedido>,
    pub form: PedidoForm,
    editing: Option<String>,
    filter: String,
    scope: FilterScope,
    /// 当前提示及其序号；序号每次设置提示时递增
    notice: Option<(u32, Notice)>,
    notice_seq: u32,
    loading: bool,
    saving: bool,
}

impl PedidoBoard {
    pub fn new(scope: FilterScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    // --- Accessors ---

    pub fn pedidos(&self) -> &[Pedido] {
        &self.pedidos
    }

    /// 正在编辑的订单 id；`None` 表示新建模式
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn scope(&self) -> FilterScope {
        self.scope
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.map(|(_, notice)| notice)
    }

    /// 当前提示及其序号，用于定时清除时区分先后两条相同的提示
    pub fn posted_notice(&self) -> Option<(u32, Notice)> {
        self.notice
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    fn post(&mut self, notice: Notice) {
        self.notice_seq = self.notice_seq.wrapping_add(1);
        self.notice = Some((self.notice_seq, notice));
    }

    /// 只清除序号匹配的提示；之后设置的提示不受影响
    pub fn dismiss_notice(&mut self, seq: u32) -> bool {
        match self.notice {
            Some((current, _)) if current == seq => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    // --- 加载 ---

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// 失败时保留当前列表（首次加载即为空列表）并给出提示
    pub fn apply_load(&mut self, result: ApiResult<Vec<Pedido>>) {
        self.loading = false;
        match result {
            Ok(list) => {
                log::info!("loaded {} pedidos", list.len());
                self.pedidos = list;
            }
            Err(e) => {
                log::error!("failed to load pedidos: {}", e);
                self.post(Notice::Error(FailureKind::Fetch));
            }
        }
    }

    // --- 新建 / 更新 ---

    /// 校验表单并给出要执行的请求；校验失败时设置提示并返回 `None`
    pub fn prepare_submit(&mut self) -> Option<SubmitPlan> {
        match self.form.validate() {
            Ok(payload) => {
                self.saving = true;
                Some(match &self.editing {
                    Some(id) => SubmitPlan::Update {
                        id: id.clone(),
                        payload,
                    },
                    None => SubmitPlan::Create(payload),
                })
            }
            Err(notice) => {
                self.post(notice);
                None
            }
        }
    }

    /// 应用提交结果
    ///
    /// 表单只在编辑目标仍是本次提交的目标时才清空，
    /// 请求期间用户改选了其他订单则保留新的选择。
    pub fn apply_submit(&mut self, result: Result<SubmitOutcome, SubmitError>) {
        self.saving = false;
        match result {
            Ok(SubmitOutcome::Created(pedido)) => {
                self.pedidos.push(pedido);
                self.post(Notice::Success(SuccessKind::Create));
                if self.editing.is_none() {
                    self.form.clear();
                }
            }
            Ok(SubmitOutcome::Updated {
                id,
                payload,
                server,
            }) => {
                let dados = server.map(|p| p.dados).unwrap_or(payload);
                if let Some(existing) = self.pedidos.iter_mut().find(|p| p.id == id) {
                    existing.dados = dados;
                }
                self.post(Notice::Success(SuccessKind::Update));
                if self.editing.as_deref() == Some(id.as_str()) {
                    self.cancel_edit();
                }
            }
            Err(SubmitError { target, error }) => {
                let kind = match target {
                    Some(_) => FailureKind::Update,
                    None => FailureKind::Create,
                };
                log::error!("failed to save pedido: {}", error);
                self.post(Notice::Error(kind));
            }
        }
    }

    // --- 编辑 ---

    /// 将选中的订单填入表单并记录为编辑目标，不访问服务端
    pub fn edit(&mut self, id: &str) -> bool {
        match self.pedidos.iter().find(|p| p.id == id) {
            Some(pedido) => {
                self.form = PedidoForm::from_pedido(pedido);
                self.editing = Some(pedido.id.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.clear();
        self.editing = None;
    }

    // --- 删除 ---

    pub fn begin_delete(&mut self) {
        self.saving = true;
    }

    /// 服务端确认后移除本地条目；本地不存在该 id 时不做改动
    pub fn apply_delete(&mut self, id: &str, result: ApiResult<()>) {
        self.saving = false;
        match result {
            Ok(()) => {
                self.pedidos.retain(|p| p.id != id);
                if self.editing.as_deref() == Some(id) {
                    self.cancel_edit();
                }
                self.post(Notice::Success(SuccessKind::Delete));
            }
            Err(e) => {
                log::error!("failed to delete pedido {}: {}", id, e);
                self.post(Notice::Error(FailureKind::Delete));
            }
        }
    }

    // --- 派生数据 ---

    /// 按当前过滤字符串筛选
    pub fn filtered(&self) -> Vec<&Pedido> {
        filter_pedidos(&self.pedidos, &self.filter, self.scope)
    }

    /// 导出全部已加载订单（忽略过滤）
    pub fn export_csv(&self) -> String {
        to_csv(&self.pedidos)
    }

    pub fn totals(&self) -> Totals {
        Totals {
            count: self.pedidos.len(),
            valor: self.pedidos.iter().map(Pedido::valor).sum(),
        }
    }

    // --- 异步驱动 ---
    //
    // 需要在整个请求期间独占看板的调用方使用（测试、原生工具）。
    // 界面把看板放在信号里，不能跨 await 持有借用，因此自行分三步调用。

    pub async fn load<C: HttpClient>(&mut self, gateway: &PedidosGateway<C>) {
        self.begin_load();
        let result = gateway.list().await;
        self.apply_load(result);
    }

    pub async fn submit<C: HttpClient>(&mut self, gateway: &PedidosGateway<C>) {
        if let Some(plan) = self.prepare_submit() {
            let result = plan.execute(gateway).await;
            self.apply_submit(result);
        }
    }

    pub async fn delete<C: HttpClient>(&mut self, gateway: &PedidosGateway<C>, id: &str) {
        self.begin_delete();
        let result = gateway.delete(id).await;
        self.apply_delete(id, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;

    const BASE: &str = "http://127.0.0.1:8000/api";
    const COLLECTION: &str = "http://127.0.0.1:8000/api/pedidos/";

    fn seeded(client: &MockHttpClient) -> serde_json::Value {
        let list = json!([
            { "id": "1", "cliente": "Ana", "valor": 10, "descricao": "x" },
            { "id": "2", "cliente": "Bruno", "valor": 5.5, "descricao": "caixa" }
        ]);
        client.mock_response(HttpMethod::Get, COLLECTION, 200, list.clone());
        list
    }

    async fn loaded_board(client: &MockHttpClient) -> PedidoBoard {
        seeded(client);
        let mut board = PedidoBoard::new(FilterScope::Client);
        board.load(&PedidosGateway::new(client, BASE)).await;
        board
    }

    fn fill(board: &mut PedidoBoard, cliente: &str, valor: &str, descricao: &str) {
        board.form = PedidoForm {
            cliente: cliente.into(),
            valor: valor.into(),
            descricao: descricao.into(),
        };
    }

    #[test]
    fn form_validation() {
        let mut form = PedidoForm {
            cliente: "Ana".into(),
            valor: "10,5".into(),
            descricao: "x".into(),
        };
        assert_eq!(form.validate().unwrap().valor, 10.5);

        form.valor = "abc".into();
        assert_eq!(form.validate(), Err(Notice::Error(FailureKind::InvalidAmount)));

        form.descricao = "   ".into();
        assert_eq!(form.validate(), Err(Notice::Error(FailureKind::Validation)));
    }

    #[tokio::test]
    async fn load_failure_leaves_list_empty() {
        let client = MockHttpClient::new();
        client.mock_error(HttpMethod::Get, COLLECTION, ApiError::network("refused"));

        let mut board = PedidoBoard::default();
        board.load(&PedidosGateway::new(&client, BASE)).await;

        assert!(board.pedidos().is_empty());
        assert!(!board.is_loading());
        assert_eq!(board.notice(), Some(Notice::Error(FailureKind::Fetch)));
    }

    #[tokio::test]
    async fn create_appends_server_order() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_response(
            HttpMethod::Post,
            COLLECTION,
            201,
            json!({ "id": "srv-9", "cliente": "Carla", "valor": 7, "descricao": "novo" }),
        );

        fill(&mut board, "Carla", "7", "novo");
        board.submit(&PedidosGateway::new(&client, BASE)).await;

        assert_eq!(board.pedidos().len(), 3);
        assert_eq!(board.pedidos()[2].id, "srv-9");
        assert_eq!(board.form, PedidoForm::default());
        assert_eq!(board.editing(), None);
        assert_eq!(board.notice(), Some(Notice::Success(SuccessKind::Create)));
    }

    #[tokio::test]
    async fn update_changes_only_the_target() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Put, "http://127.0.0.1:8000/api/pedidos/2", 204, "");

        assert!(board.edit("2"));
        assert_eq!(board.form.cliente, "Bruno");
        assert_eq!(board.form.valor, "5.5");
        board.form.descricao = "caixa grande".into();
        board.submit(&PedidosGateway::new(&client, BASE)).await;

        assert_eq!(board.pedidos().len(), 2);
        assert_eq!(board.pedidos()[0].descricao(), "x");
        assert_eq!(board.pedidos()[1].descricao(), "caixa grande");
        assert_eq!(board.pedidos()[1].id, "2");
        assert_eq!(board.editing(), None);
        assert_eq!(board.notice(), Some(Notice::Success(SuccessKind::Update)));
    }

    #[tokio::test]
    async fn failed_update_keeps_form_and_target() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Put, "http://127.0.0.1:8000/api/pedidos/1", 500, "oops");

        board.edit("1");
        board.form.valor = "99".into();
        board.submit(&PedidosGateway::new(&client, BASE)).await;

        assert_eq!(board.pedidos()[0].valor(), 10.0);
        assert_eq!(board.editing(), Some("1"));
        assert_eq!(board.form.valor, "99");
        assert_eq!(board.notice(), Some(Notice::Error(FailureKind::Update)));
        assert!(!board.is_saving());
    }

    #[tokio::test]
    async fn invalid_form_makes_no_request() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        let before = client.request_count();

        fill(&mut board, "Carla", "", "novo");
        board.submit(&PedidosGateway::new(&client, BASE)).await;

        assert_eq!(client.request_count(), before);
        assert_eq!(board.pedidos().len(), 2);
        assert_eq!(board.notice(), Some(Notice::Error(FailureKind::Validation)));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Delete, "http://127.0.0.1:8000/api/pedidos/1", 204, "");

        board.delete(&PedidosGateway::new(&client, BASE), "1").await;

        assert_eq!(board.pedidos().len(), 1);
        assert_eq!(board.pedidos()[0].id, "2");
        assert_eq!(board.notice(), Some(Notice::Success(SuccessKind::Delete)));
    }

    #[tokio::test]
    async fn deleting_absent_id_still_calls_server() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Delete, "http://127.0.0.1:8000/api/pedidos/77", 204, "");
        let before = client.request_count();

        board.delete(&PedidosGateway::new(&client, BASE), "77").await;

        assert_eq!(client.request_count(), before + 1);
        assert_eq!(board.pedidos().len(), 2);
    }

    #[tokio::test]
    async fn failed_delete_keeps_entry() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;

        // 未预设 -> 404
        board.delete(&PedidosGateway::new(&client, BASE), "1").await;

        assert_eq!(board.pedidos().len(), 2);
        assert_eq!(board.notice(), Some(Notice::Error(FailureKind::Delete)));
    }

    #[tokio::test]
    async fn deleting_the_edit_target_leaves_create_mode() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Delete, "http://127.0.0.1:8000/api/pedidos/2", 204, "");

        board.edit("2");
        board.delete(&PedidosGateway::new(&client, BASE), "2").await;

        assert_eq!(board.editing(), None);
        assert_eq!(board.form, PedidoForm::default());
    }

    #[tokio::test]
    async fn filter_and_export_work_on_loaded_list() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;

        board.set_filter("an");
        let ids: Vec<_> = board.filtered().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, ["1"]);

        board.set_filter("zz");
        assert!(board.filtered().is_empty());

        // 导出不受过滤影响
        let csv = board.export_csv();
        assert_eq!(csv.lines().count(), 3);
        assert_eq!(csv.lines().nth(2), Some("2,Bruno,5.50,caixa"));

        let totals = board.totals();
        assert_eq!(totals.count, 2);
        assert_eq!(totals.valor, 15.5);
    }

    #[tokio::test]
    async fn switching_rows_during_update_keeps_new_selection() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Put, "http://127.0.0.1:8000/api/pedidos/1", 204, "");
        let gateway = PedidosGateway::new(&client, BASE);

        board.edit("1");
        board.form.valor = "12".into();
        let plan = board.prepare_submit().unwrap();
        assert_eq!(plan.target(), Some("1"));

        // 请求未返回时改选第二行
        assert!(board.edit("2"));
        let result = plan.execute(&gateway).await;
        board.apply_submit(result);

        assert_eq!(board.pedidos()[0].valor(), 12.0);
        assert_eq!(board.editing(), Some("2"));
        assert_eq!(board.form.cliente, "Bruno");
        assert_eq!(board.notice(), Some(Notice::Success(SuccessKind::Update)));
    }

    #[tokio::test]
    async fn failed_create_reports_create_even_after_edit_started() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Post, COLLECTION, 500, "oops");
        let gateway = PedidosGateway::new(&client, BASE);

        fill(&mut board, "Carla", "7", "novo");
        let plan = board.prepare_submit().unwrap();
        board.edit("1");
        let result = plan.execute(&gateway).await;
        board.apply_submit(result);

        assert_eq!(board.notice(), Some(Notice::Error(FailureKind::Create)));
        assert_eq!(board.editing(), Some("1"));
        assert_eq!(board.form.cliente, "Ana");
    }

    #[tokio::test]
    async fn older_timer_does_not_clear_repeated_notice() {
        let client = MockHttpClient::new();
        let mut board = loaded_board(&client).await;
        client.mock_raw(HttpMethod::Delete, "http://127.0.0.1:8000/api/pedidos/1", 204, "");
        client.mock_raw(HttpMethod::Delete, "http://127.0.0.1:8000/api/pedidos/2", 204, "");
        let gateway = PedidosGateway::new(&client, BASE);

        board.delete(&gateway, "1").await;
        let (first, notice) = board.posted_notice().unwrap();
        board.delete(&gateway, "2").await;
        let (second, repeated) = board.posted_notice().unwrap();

        assert_eq!(notice, repeated);
        assert_ne!(first, second);

        assert!(!board.dismiss_notice(first));
        assert_eq!(board.notice(), Some(Notice::Success(SuccessKind::Delete)));
        assert!(board.dismiss_notice(second));
        assert_eq!(board.notice(), None);
    }

    #[test]
    fn edit_unknown_id_is_ignored() {
        let mut board = PedidoBoard::default();
        assert!(!board.edit("nope"));
        assert_eq!(board.editing(), None);
    }
}
