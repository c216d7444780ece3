//! 环境变量说明表
//!
//! 配置加载失败时打印给运维人员，列出每个变量的类型、默认值和说明

use std::fmt::Write;

use crate::field::FieldSpec;
use crate::loader::{EnvConfig, prefixed_key};

const HEADERS: [&str; 5] = ["KEY", "TYPE", "DEFAULT", "REQUIRED", "DESCRIPTION"];

/// 渲染某个配置类型的变量说明
pub fn usage<T: EnvConfig>(prefix: Option<&str>) -> String {
    render(T::FIELDS, prefix)
}

/// 渲染任意字段表
pub(crate) fn render(fields: &[FieldSpec], prefix: Option<&str>) -> String {
    let rows: Vec<[String; 5]> = fields
        .iter()
        .map(|spec| {
            [
                prefixed_key(prefix, spec.name),
                spec.kind.to_string(),
                spec.default.map(|d| d.to_string()).unwrap_or_default(),
                if spec.required { "true" } else { "" }.to_string(),
                spec.description.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i + 1 == cells.len() {
            line.push_str(cell);
        } else {
            // String 的 fmt::Write 不会失败
            let _ = write!(line, "{:<width$}    ", cell, width = width);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
