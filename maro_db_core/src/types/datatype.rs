use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declared column type. Validation never interprets it; it is carried
/// through to the catalog as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int,
    BigInt,
    Decimal { precision: u32, scale: u32 },
    VarChar(usize),
    Text,
    Date,
    Timestamp,
    Uuid,
    Json,
    Blob,
}

pub fn parse_datatype(s: &str) -> Result<DataType, String> {
    let lower = s.trim().to_lowercase();
    if let Some(inner) = strip_args(&lower, "varchar") {
        let n: usize = inner
            .trim()
            .parse()
            .map_err(|_| "Bad varchar type. Use varchar(n)".to_string())?;
        return Ok(DataType::VarChar(n));
    }
    if let Some(inner) = strip_args(&lower, "decimal") {
        let (p, s) = inner
            .split_once(',')
            .ok_or_else(|| "Bad decimal type. Use decimal(p,s)".to_string())?;
        let precision: u32 = p
            .trim()
            .parse()
            .map_err(|_| "Bad decimal type. Use decimal(p,s)".to_string())?;
        let scale: u32 = s
            .trim()
            .parse()
            .map_err(|_| "Bad decimal type. Use decimal(p,s)".to_string())?;
        if scale > precision {
            return Err(format!(
                "Bad decimal type. Scale {scale} exceeds precision {precision}"
            ));
        }
        return Ok(DataType::Decimal { precision, scale });
    }
    match lower.as_str() {
        "bool" | "boolean" => Ok(DataType::Bool),
        "int" => Ok(DataType::Int),
        "bigint" => Ok(DataType::BigInt),
        "text" => Ok(DataType::Text),
        "date" => Ok(DataType::Date),
        "timestamp" => Ok(DataType::Timestamp),
        "uuid" => Ok(DataType::Uuid),
        "json" => Ok(DataType::Json),
        "blob" => Ok(DataType::Blob),
        other => Err(format!(
            "Unknown type '{other}'. Use bool|int|bigint|decimal(p,s)|varchar(n)|text|date|timestamp|uuid|json|blob"
        )),
    }
}

fn strip_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?.trim_start().strip_prefix('(')?.strip_suffix(')')
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "bool"),
            DataType::Int => write!(f, "int"),
            DataType::BigInt => write!(f, "bigint"),
            DataType::Decimal { precision, scale } => write!(f, "decimal({precision},{scale})"),
            DataType::VarChar(n) => write!(f, "varchar({n})"),
            DataType::Text => write!(f, "text"),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Uuid => write!(f, "uuid"),
            DataType::Json => write!(f, "json"),
            DataType::Blob => write!(f, "blob"),
        }
    }
}

// Stored by name so catalog files stay readable: "int", "varchar(20)", ...
impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_datatype(&raw).map_err(serde::de::Error::custom)
    }
}
