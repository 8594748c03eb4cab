/// 消息富文本段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupSegment {
    /// 普通文本
    Text(String),
    /// 可点击链接，在新的浏览上下文中打开
    Link(String),
    /// 换行
    LineBreak,
}

/// 消息渲染服务
///
/// 领域服务：把原始消息文本切分为可渲染的富文本段。
/// 换行符转换为 LineBreak，http/https URL（到下一个空白符为止）
/// 转换为 Link，其余内容原样保留。服务端输出是可信的，
/// 这里不做任何转义
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer;

impl MarkupRenderer {
    /// 创建新的渲染器
    pub fn new() -> Self {
        Self
    }

    /// 渲染一条消息文本
    pub fn render(&self, text: &str) -> Vec<MarkupSegment> {
        let mut segments = Vec::new();

        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                segments.push(MarkupSegment::LineBreak);
            }
            render_line(line, &mut segments);
        }

        segments
    }
}

fn render_line(line: &str, segments: &mut Vec<MarkupSegment>) {
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(offset) = find_url_start(&line[cursor..]) {
        let url_start = cursor + offset;
        let tail = &line[url_start..];
        let scheme_len = if tail.starts_with("https://") { 8 } else { 7 };
        let url_len = tail
            .find(char::is_whitespace)
            .unwrap_or(tail.len());

        // 协议头后面没有内容时不算链接
        if url_len == scheme_len {
            cursor = url_start + scheme_len;
            continue;
        }

        if url_start > text_start {
            segments.push(MarkupSegment::Text(line[text_start..url_start].to_string()));
        }
        segments.push(MarkupSegment::Link(tail[..url_len].to_string()));

        cursor = url_start + url_len;
        text_start = cursor;
    }

    if text_start < line.len() {
        segments.push(MarkupSegment::Text(line[text_start..].to_string()));
    }
}

fn find_url_start(s: &str) -> Option<usize> {
    match (s.find("http://"), s.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
