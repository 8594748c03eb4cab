use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::modules::chat::domain::Message;
use crate::modules::chat::ports::{ResultPanel, ViewPort};

/// 视图内部状态
#[derive(Debug, Default)]
struct ViewState {
    messages: Vec<Message>,
    input: String,
    typing_indicator: bool,
    form_visible: bool,
    form_level: String,
    form_gpa: String,
    form_test_type: String,
    form_test_score: String,
    result_panel: ResultPanel,
    alerts: Vec<String>,
}

/// 内存视图
///
/// 用于开发和测试：把所有视图操作记录在内存状态里，
/// 测试可以直接检查渲染结果
#[derive(Default)]
pub struct InMemoryView {
    state: RwLock<ViewState>,
}

impl InMemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, ViewState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ViewState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 模拟用户在资格核查表单中输入
    pub fn fill_form(&self, level: &str, gpa: &str, test_type: &str, test_score: &str) {
        let mut state = self.write();
        state.form_level = level.to_string();
        state.form_gpa = gpa.to_string();
        state.form_test_type = test_type.to_string();
        state.form_test_score = test_score.to_string();
    }

    // 检查接口

    pub fn messages(&self) -> Vec<Message> {
        self.read().messages.clone()
    }

    pub fn last_message(&self) -> Option<Message> {
        self.read().messages.last().cloned()
    }

    pub fn input(&self) -> String {
        self.read().input.clone()
    }

    pub fn typing_indicator_visible(&self) -> bool {
        self.read().typing_indicator
    }

    /// 打字指示器数量，任意观察点都只能是 0 或 1
    pub fn typing_indicator_count(&self) -> usize {
        usize::from(self.read().typing_indicator)
    }

    pub fn form_visible(&self) -> bool {
        self.read().form_visible
    }

    pub fn form_fields(&self) -> (String, String, String, String) {
        let state = self.read();
        (
            state.form_level.clone(),
            state.form_gpa.clone(),
            state.form_test_type.clone(),
            state.form_test_score.clone(),
        )
    }

    pub fn result_panel(&self) -> ResultPanel {
        self.read().result_panel.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.read().alerts.clone()
    }
}

impl ViewPort for InMemoryView {
    fn append_message(&self, message: &Message) {
        self.write().messages.push(message.clone());
    }

    fn clear_messages(&self) {
        self.write().messages.clear();
    }

    fn set_input(&self, text: &str) {
        self.write().input = text.to_string();
    }

    fn clear_input(&self) {
        self.write().input.clear();
    }

    fn set_typing_indicator(&self, visible: bool) {
        self.write().typing_indicator = visible;
    }

    fn set_form_visible(&self, visible: bool) {
        let mut state = self.write();
        state.form_visible = visible;
        if !visible {
            // 隐藏即清空：表单字段和结果面板一起复位
            state.form_level.clear();
            state.form_gpa.clear();
            state.form_test_type.clear();
            state.form_test_score.clear();
            state.result_panel = ResultPanel::Empty;
        }
    }

    fn set_result_panel(&self, panel: ResultPanel) {
        self.write().result_panel = panel;
    }

    fn alert(&self, text: &str) {
        self.write().alerts.push(text.to_string());
    }
}
