//! 宽松反序列化工具
//!
//! 后端返回的字段类型并不稳定：ID 可能是数字也可能是字符串，
//! 列表字段可能是单个字符串、数组或 `null`。这里统一经由
//! `serde_json::Value` 中转后再归一化为确定的 Rust 类型。

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// 将标量转换为字符串，非标量返回 None
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// 字符串或数字 -> `String`（`null` 视为空串）
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(String::new()),
        other => scalar_to_string(&other)
            .ok_or_else(|| serde::de::Error::custom(format!("expected string or number, got {other}"))),
    }
}

/// 字符串或数字 -> `Option<String>`
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// `null` / 单值 / 数组 -> `Vec<String>`
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(&other).into_iter().collect(),
    })
}

/// 只接受布尔值，其余类型视为未设置
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

/// 对象 -> `BTreeMap<String, String>`，丢弃非标量的值
pub fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
            .collect(),
        _ => BTreeMap::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "opt_string_or_number")]
        price: Option<String>,
        #[serde(default, deserialize_with = "string_list")]
        list: Vec<String>,
        #[serde(default, deserialize_with = "lenient_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "string_map")]
        params: BTreeMap<String, String>,
    }

    #[test]
    fn numeric_id_becomes_string() {
        let p: Probe = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.price, None);
        assert!(p.list.is_empty());
    }

    #[test]
    fn single_string_list_is_wrapped() {
        let p: Probe = serde_json::from_str(r#"{"id": "a", "list": "灯具", "price": 12.5}"#).unwrap();
        assert_eq!(p.list, vec!["灯具".to_string()]);
        assert_eq!(p.price.as_deref(), Some("12.5"));
    }

    #[test]
    fn non_bool_flag_is_unset() {
        let p: Probe = serde_json::from_str(r#"{"id": "a", "flag": 1}"#).unwrap();
        assert_eq!(p.flag, None);
        let p: Probe = serde_json::from_str(r#"{"id": "a", "flag": false}"#).unwrap();
        assert_eq!(p.flag, Some(false));
    }

    #[test]
    fn map_keeps_scalar_values() {
        let p: Probe =
            serde_json::from_str(r#"{"id": "a", "params": {"材质": "黄铜", "重量": 3, "x": {}}}"#)
                .unwrap();
        assert_eq!(p.params.get("材质").map(String::as_str), Some("黄铜"));
        assert_eq!(p.params.get("重量").map(String::as_str), Some("3"));
        assert!(!p.params.contains_key("x"));
    }
}
