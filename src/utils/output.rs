//! # 美化输出工具
//!
//! 提供统一的终端输出样式。每条消息同时写入实验日志
//! （未指定 `--log-file` 时 `log` 记录被丢弃）。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate，`log` 门面

use colored::Colorize;

/// 打印成功消息
pub fn print_success(msg: &str) {
    log::info!("{}", msg);
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    log::error!("{}", msg);
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    log::warn!("{}", msg);
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    log::info!("{}", msg);
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    log::info!("{}", msg);
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印写出文件消息
pub fn print_written(path: &str) {
    log::info!("wrote {}", path);
    println!("{} {} {}", "[OK]".green().bold(), "wrote".dimmed(), path);
}

/// 打印多行说明文字（如耗时估计），逐行缩进
pub fn print_block(text: &str) {
    for line in text.lines() {
        log::info!("{}", line);
        println!("    {}", line.cyan());
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
