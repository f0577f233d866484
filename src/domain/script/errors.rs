//! Script Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("规则脚本为空")]
    Empty,

    #[error("第 {0} 条规则缺少标题和正文")]
    BlankEntry(usize),

    #[error("规则文件读取错误: {0}")]
    FileReadError(String),

    #[error("规则文件解析错误: {0}")]
    ParseError(String),
}
