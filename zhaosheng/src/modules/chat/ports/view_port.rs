use crate::modules::chat::domain::Message;

/// 结果面板色调
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTone {
    /// 绿色：符合条件
    Success,
    /// 琥珀色：暂不符合
    Caution,
    /// 红色：错误
    Error,
}

/// 资格核查结果面板内容
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    /// 空白
    #[default]
    Empty,
    /// 加载中占位
    Loading,
    /// 判定结果
    Verdict { tone: ResultTone, text: String },
}

/// 视图端口 - 渲染表面的抽象接口
///
/// 控制器只通过这些类型化操作更新界面，不关心具体渲染表面。
/// 所有视图变更都发生在单个同步调用里（共享的可变目标只有视图，
/// 两次变更不会交错），因此端口是同步的。
///
/// 实现方约定：
/// - 任意时刻至多存在一个打字指示器；重复隐藏是幂等操作，
///   并发的发送请求共享同一个指示器
/// - 隐藏资格核查表单时必须同时清空表单字段和结果面板
pub trait ViewPort: Send + Sync {
    /// 追加一条消息到消息列表末尾
    fn append_message(&self, message: &Message);

    /// 清空消息列表
    fn clear_messages(&self);

    /// 设置输入框内容
    fn set_input(&self, text: &str);

    /// 清空输入框
    fn clear_input(&self);

    /// 显示或隐藏打字指示器
    fn set_typing_indicator(&self, visible: bool);

    /// 显示或隐藏资格核查表单
    fn set_form_visible(&self, visible: bool);

    /// 设置资格核查结果面板
    fn set_result_panel(&self, panel: ResultPanel);

    /// 阻塞式提示（表单校验失败时使用）
    fn alert(&self, text: &str);
}
