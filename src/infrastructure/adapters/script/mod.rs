//! Script Loader - 从配置加载规则脚本

mod file_loader;

pub use file_loader::load_script;
