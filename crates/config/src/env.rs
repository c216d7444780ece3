//! 环境变量快照

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;

/// 某一时刻的环境变量快照
///
/// 加载只读取快照，之后进程环境的变化不会影响已加载的配置。
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
    /// 已设置但值不是合法 UTF-8 的变量
    non_unicode: HashSet<String>,
}

impl EnvSnapshot {
    /// 捕获当前进程环境
    pub fn capture() -> Self {
        Self::from_os(std::env::vars_os())
    }

    /// 从操作系统字符串构建
    ///
    /// 名称不是 UTF-8 的变量无法被任何字段引用，直接跳过；
    /// 值不是 UTF-8 的变量记为非法值，而不是未设置。
    pub fn from_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut snapshot = Self::default();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => {
                    snapshot.vars.insert(key, value);
                }
                Err(_) => {
                    snapshot.non_unicode.insert(key);
                }
            }
        }
        snapshot
    }

    /// 查找变量，空字符串视为未设置
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// 变量已设置，但值不是 UTF-8
    pub fn is_non_unicode(&self, key: &str) -> bool {
        self.non_unicode.contains(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len() + self.non_unicode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.non_unicode.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            non_unicode: HashSet::new(),
        }
    }
}
