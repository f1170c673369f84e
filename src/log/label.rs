use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// 标签值
///
/// 只支持 JSON 的原子类型：字符串、整数、浮点数、布尔值。
/// 复杂结构请先序列化为 JSON 字符串再作为字符串标签输出
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LabelValue {
    /// 默认值，只在构造出错时出现，输出时显示为 `!unknown_type!`
    #[default]
    Unknown,
    String(Cow<'static, str>),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Unknown 类型标签的输出值
pub const UNKNOWN_VALUE: &str = "!unknown_type!";

impl LabelValue {
    /// 值类型名称
    pub fn kind(&self) -> &'static str {
        match self {
            LabelValue::Unknown => "unknown",
            LabelValue::String(_) => "string",
            LabelValue::Int(_) => "int",
            LabelValue::Float(_) => "float",
            LabelValue::Bool(_) => "bool",
        }
    }
}

impl Serialize for LabelValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LabelValue::Unknown => serializer.serialize_str(UNKNOWN_VALUE),
            LabelValue::String(s) => serializer.serialize_str(s),
            LabelValue::Int(n) => serializer.serialize_i64(*n),
            LabelValue::Float(n) if n.is_nan() => serializer.serialize_str("NaN"),
            LabelValue::Float(n) if n.is_infinite() => {
                serializer.serialize_str(if *n > 0.0 { "+Inf" } else { "-Inf" })
            }
            LabelValue::Float(n) => serializer.serialize_f64(*n),
            LabelValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelValue::Unknown => f.write_str(UNKNOWN_VALUE),
            LabelValue::String(s) => f.write_str(s),
            LabelValue::Int(n) => write!(f, "{}", n),
            LabelValue::Float(n) => write!(f, "{}", n),
            LabelValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for LabelValue {
    fn from(s: String) -> Self {
        LabelValue::String(Cow::Owned(s))
    }
}

impl From<&'static str> for LabelValue {
    fn from(s: &'static str) -> Self {
        LabelValue::String(Cow::Borrowed(s))
    }
}

impl From<i64> for LabelValue {
    fn from(n: i64) -> Self {
        LabelValue::Int(n)
    }
}

impl From<i32> for LabelValue {
    fn from(n: i32) -> Self {
        LabelValue::Int(n as i64)
    }
}

impl From<u32> for LabelValue {
    fn from(n: u32) -> Self {
        LabelValue::Int(n as i64)
    }
}

impl From<f64> for LabelValue {
    fn from(n: f64) -> Self {
        LabelValue::Float(n)
    }
}

impl From<f32> for LabelValue {
    fn from(n: f32) -> Self {
        LabelValue::Float(n as f64)
    }
}

impl From<bool> for LabelValue {
    fn from(b: bool) -> Self {
        LabelValue::Bool(b)
    }
}

/// 一个结构化的键值对，构造后不可变
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    key: Cow<'static, str>,
    value: LabelValue,
}

impl Label {
    /// 通用构造方法
    ///
    /// ```
    /// use logx::log::Label;
    ///
    /// let label = Label::new("user_id", 12345);
    /// assert_eq!(label.key(), "user_id");
    /// ```
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<LabelValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// 字符串标签
    pub fn string(key: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
        Self::new(key, LabelValue::String(value.into()))
    }

    /// 整数标签
    pub fn int(key: impl Into<Cow<'static, str>>, value: i64) -> Self {
        Self::new(key, LabelValue::Int(value))
    }

    /// 浮点数标签
    pub fn float(key: impl Into<Cow<'static, str>>, value: f64) -> Self {
        Self::new(key, LabelValue::Float(value))
    }

    /// 布尔标签
    pub fn bool(key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        Self::new(key, LabelValue::Bool(value))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &LabelValue {
        &self.value
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_value_non_finite_float_serialize() {
        assert_eq!(serde_json::to_string(&LabelValue::Float(f64::NAN)).unwrap(), r#""NaN""#);
        assert_eq!(serde_json::to_string(&LabelValue::Float(f64::INFINITY)).unwrap(), r#""+Inf""#);
        assert_eq!(
            serde_json::to_string(&LabelValue::Float(f64::NEG_INFINITY)).unwrap(),
            r#""-Inf""#
        );
        assert_eq!(serde_json::to_string(&LabelValue::Float(1.5)).unwrap(), "1.5");
    }

    #[test]
    fn test_label_constructors() {
        let s = Label::string("app", "demo");
        assert_eq!(s.key(), "app");
        assert_eq!(s.value(), &LabelValue::String("demo".into()));

        let i = Label::int("port", 8080);
        assert_eq!(i.value(), &LabelValue::Int(8080));

        let f = Label::float("ratio", 0.5);
        assert_eq!(f.value(), &LabelValue::Float(0.5));

        let b = Label::bool("ok", true);
        assert_eq!(b.value(), &LabelValue::Bool(true));
    }

    #[test]
    fn test_label_new_from_conversions() {
        assert_eq!(Label::new("a", 1i32).value(), &LabelValue::Int(1));
        assert_eq!(Label::new("b", 2u32).value(), &LabelValue::Int(2));
        assert_eq!(Label::new("c", 1.5f32).value(), &LabelValue::Float(1.5));
        assert_eq!(Label::new("d", false).value(), &LabelValue::Bool(false));
        assert_eq!(
            Label::new("e", format!("id-{}", 7)).value(),
            &LabelValue::String("id-7".into())
        );
        assert_eq!(Label::new(String::from("dyn"), "x").key(), "dyn");
    }

    #[test]
    fn test_label_default_is_unknown() {
        let label = Label::default();
        assert_eq!(label.value(), &LabelValue::Unknown);
        assert_eq!(label.value().kind(), "unknown");
        assert_eq!(label.value().to_string(), UNKNOWN_VALUE);
        assert_eq!(
            serde_json::to_string(label.value()).unwrap(),
            format!("\"{}\"", UNKNOWN_VALUE)
        );
    }

    #[test]
    fn test_label_value_display() {
        assert_eq!(LabelValue::from("hello").to_string(), "hello");
        assert_eq!(LabelValue::Int(-42).to_string(), "-42");
        assert_eq!(LabelValue::Float(3.25).to_string(), "3.25");
        assert_eq!(LabelValue::Bool(true).to_string(), "true");
        assert_eq!(Label::int("n", 3).to_string(), "n=3");
    }

    #[test]
    fn test_label_value_serialize() {
        assert_eq!(serde_json::to_string(&LabelValue::from("hi")).unwrap(), "\"hi\"");
        assert_eq!(serde_json::to_string(&LabelValue::Int(42)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&LabelValue::Float(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&LabelValue::Bool(false)).unwrap(), "false");
    }
}
