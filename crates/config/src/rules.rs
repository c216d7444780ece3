//! 通用领域校验规则

use crate::error::Violation;

pub const MIN_PORT: i64 = 1;
pub const MAX_PORT: i64 = 65535;

/// 网络端口必须在 1-65535 之间
pub fn port(field: &'static str, value: i64) -> Result<(), Violation> {
    if (MIN_PORT..=MAX_PORT).contains(&value) {
        Ok(())
    } else {
        Err(Violation::new(
            field,
            format!("port {} must be in the range {}-{}", value, MIN_PORT, MAX_PORT),
        ))
    }
}

/// 字符串不能为空白
pub fn not_blank(field: &'static str, value: &str) -> Result<(), Violation> {
    if value.trim().is_empty() {
        Err(Violation::new(field, "must not be blank"))
    } else {
        Ok(())
    }
}
