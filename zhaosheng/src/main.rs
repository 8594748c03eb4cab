use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use zhaosheng::modules::chat::{
    ChatModule, ConversationServiceConfig, EligibilityQuery, TerminalView,
};
use zhaosheng::shared::{AppError, AppResult};

/// 预设快捷消息
const QUICK_MESSAGES: &[&str] = &[
    "How do I apply?",
    "What documents are required?",
    "What are the application deadlines?",
    "Check eligibility",
];

#[tokio::main]
async fn main() -> AppResult<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zhaosheng=info".into()),
        )
        .with_target(false)
        .init();

    let config = config_from_env()?;
    tracing::info!("Connecting to admissions service at {}", config.base_url);

    let view = Arc::new(TerminalView::new());
    let module = ChatModule::with_http(config, view)
        .map_err(|e| AppError::ConversationError(e.to_string()))?;

    module.greet();
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim().to_string();

        match input.as_str() {
            ":quit" | ":q" => break,
            ":help" => print_help(),
            ":reset" => {
                if let Err(e) = module.reset_conversation().await {
                    tracing::debug!("reset rejected: {}", e);
                }
            }
            ":form" => module.show_eligibility_form(),
            ":hide" => module.hide_eligibility_form(),
            ":check" => run_eligibility_check(&module, &mut lines).await?,
            _ => {
                if let Some(quick) = quick_shortcut(&input) {
                    if let Err(e) = module.send_quick_message(quick).await {
                        tracing::debug!("quick message rejected: {}", e);
                    }
                } else if let Err(e) = module.send_message(input).await {
                    tracing::debug!("message rejected: {}", e);
                }
            }
        }
    }

    Ok(())
}

fn config_from_env() -> AppResult<ConversationServiceConfig> {
    let mut config = ConversationServiceConfig::default();

    if let Ok(url) = std::env::var("ZHAOSHENG_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(timeout) = std::env::var("ZHAOSHENG_TIMEOUT_SECS") {
        config.timeout_secs = timeout.parse().map_err(|_| {
            AppError::ConfigError(format!("invalid ZHAOSHENG_TIMEOUT_SECS: {}", timeout))
        })?;
    }

    Ok(config)
}

/// 提示并收集四个资格核查字段，交给核查处理器。
/// 字段留空时处理器会弹出校验提示，不发起请求
async fn run_eligibility_check(
    module: &ChatModule,
    lines: &mut Lines<BufReader<Stdin>>,
) -> AppResult<()> {
    module.show_eligibility_form();

    let level = prompt_field("Education level (undergraduate/graduate)", lines).await?;
    let gpa = prompt_field("GPA", lines).await?;
    let test_type = prompt_field("Test type (SAT/ACT/GRE/GMAT)", lines).await?;
    let test_score = prompt_field("Test score", lines).await?;

    let query = EligibilityQuery::new(level, gpa, test_type, test_score);
    if let Err(e) = module.check_eligibility(query).await {
        tracing::debug!("eligibility check rejected: {}", e);
    }

    Ok(())
}

async fn prompt_field(label: &str, lines: &mut Lines<BufReader<Stdin>>) -> AppResult<String> {
    prompt(&format!("{}: ", label))?;
    Ok(lines.next_line().await?.unwrap_or_default().trim().to_string())
}

fn prompt(text: &str) -> AppResult<()> {
    let mut out = std::io::stdout();
    write!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}

fn print_help() {
    println!("Commands: :reset, :check, :form, :hide, :help, :quit");
    println!("Quick replies:");
    for (index, text) in QUICK_MESSAGES.iter().enumerate() {
        println!("  :{} {}", index + 1, text);
    }
}

fn quick_shortcut(input: &str) -> Option<&'static str> {
    let index: usize = input.strip_prefix(':')?.parse().ok()?;
    QUICK_MESSAGES.get(index.checked_sub(1)?).copied()
}
