use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::modules::chat::domain::{MarkupRenderer, MarkupSegment, Message, MessageSender};
use crate::modules::chat::ports::{ResultPanel, ResultTone, ViewPort};

// ANSI 控制序列
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const LINK_STYLE: &str = "\x1b[4;36m";
const ERASE_LINE: &str = "\r\x1b[2K";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const TYPING_LINE: &str = "🤖 Bot is typing...";

/// 终端视图
///
/// 把视图操作渲染为带 ANSI 标记的终端输出。
/// 链接使用 OSC 8 序列，支持的终端里可以直接点击打开
pub struct TerminalView {
    renderer: MarkupRenderer,
    typing: AtomicBool,
    form_visible: AtomicBool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            renderer: MarkupRenderer::new(),
            typing: AtomicBool::new(false),
            form_visible: AtomicBool::new(false),
        }
    }

    fn render_segments(&self, text: &str) -> String {
        let mut line = String::new();
        for segment in self.renderer.render(text) {
            match segment {
                MarkupSegment::Text(t) => line.push_str(&t),
                MarkupSegment::Link(url) => {
                    // OSC 8 超链接
                    line.push_str(&format!(
                        "{LINK_STYLE}\x1b]8;;{url}\x1b\\{url}\x1b]8;;\x1b\\{RESET}"
                    ));
                }
                MarkupSegment::LineBreak => line.push_str("\n   "),
            }
        }
        line
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewPort for TerminalView {
    fn append_message(&self, message: &Message) {
        let mut out = io::stdout().lock();
        let typing = self.typing.load(Ordering::SeqCst);
        if typing {
            let _ = write!(out, "{ERASE_LINE}");
        }

        let glyph = match message.sender() {
            MessageSender::User => "🧑",
            MessageSender::Bot => "🤖",
        };
        tracing::debug!(id = %message.id(), "render message");
        let _ = writeln!(out, "{} {}", glyph, self.render_segments(message.content()));

        if typing {
            let _ = write!(out, "{DIM}{TYPING_LINE}{RESET}");
        }
        let _ = out.flush();
    }

    fn clear_messages(&self) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "{CLEAR_SCREEN}");
        let _ = out.flush();
    }

    fn set_input(&self, text: &str) {
        // 快捷消息：回显填入输入框的文本
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{DIM}> {text}{RESET}");
        let _ = out.flush();
    }

    fn clear_input(&self) {
        // 输入行已被读取循环消费，终端上无需额外处理
    }

    fn set_typing_indicator(&self, visible: bool) {
        let was = self.typing.swap(visible, Ordering::SeqCst);
        if was == visible {
            return;
        }

        let mut out = io::stdout().lock();
        if visible {
            let _ = write!(out, "{DIM}{TYPING_LINE}{RESET}");
        } else {
            let _ = write!(out, "{ERASE_LINE}");
        }
        let _ = out.flush();
    }

    fn set_form_visible(&self, visible: bool) {
        let was = self.form_visible.swap(visible, Ordering::SeqCst);
        if was == visible {
            return;
        }

        let mut out = io::stdout().lock();
        if visible {
            let _ = writeln!(
                out,
                "{BOLD}—— Eligibility Checker ——{RESET}\n{DIM}Enter :check to fill in the form.{RESET}"
            );
        } else {
            let _ = writeln!(out, "{DIM}(eligibility form closed){RESET}");
        }
        let _ = out.flush();
    }

    fn set_result_panel(&self, panel: ResultPanel) {
        let mut out = io::stdout().lock();
        match panel {
            ResultPanel::Empty => {}
            ResultPanel::Loading => {
                let _ = writeln!(out, "{DIM}Checking eligibility...{RESET}");
            }
            ResultPanel::Verdict { tone, text } => {
                let color = match tone {
                    ResultTone::Success => GREEN,
                    ResultTone::Caution => AMBER,
                    ResultTone::Error => RED,
                };
                let _ = writeln!(out, "{}{}{}", color, self.render_segments(&text), RESET);
            }
        }
        let _ = out.flush();
    }

    fn alert(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{BOLD}[!] {text}{RESET}");
        let _ = out.flush();
    }
}
