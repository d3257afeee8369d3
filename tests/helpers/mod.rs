// ==========================================
// 集成测试共享辅助
// ==========================================

#![allow(dead_code)]

pub mod test_data_builder;

use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// 写入临时 CSV 文件（保持句柄存活直到测试结束）
pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file.flush().expect("刷新临时文件失败");
    file
}
