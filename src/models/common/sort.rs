use std::str::FromStr;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// 解析后的排序参数
///
/// 支持 `field`、`field.asc`、`field.desc` 与 `-field` 四种写法。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (field, direction) = if let Some(rest) = s.strip_prefix('-') {
            (rest, SortDirection::Desc)
        } else if let Some((field, dir)) = s.rsplit_once('.') {
            let direction = match dir.to_ascii_lowercase().as_str() {
                "asc" => SortDirection::Asc,
                "desc" => SortDirection::Desc,
                other => return Err(format!("无效的排序方向: {other}")),
            };
            (field, direction)
        } else {
            (s, SortDirection::Asc)
        };

        if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("无效的排序字段: '{s}'"));
        }

        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl SortSpec {
    /// 解析可选的排序参数，字段必须出现在 `allowed` 中
    pub fn parse_allowed(raw: Option<&str>, allowed: &[&str]) -> Result<Option<Self>, String> {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Ok(None);
        };
        let spec: SortSpec = raw.parse()?;
        if !allowed.contains(&spec.field.as_str()) {
            return Err(format!(
                "不支持按 '{}' 排序，可选字段: {}",
                spec.field,
                allowed.join(", ")
            ));
        }
        Ok(Some(spec))
    }

    pub fn into_order(self) -> sea_orm::Order {
        match self.direction {
            SortDirection::Asc => sea_orm::Order::Asc,
            SortDirection::Desc => sea_orm::Order::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let spec: SortSpec = "name".parse().unwrap();
        assert_eq!(spec.direction, SortDirection::Asc);

        let spec: SortSpec = "gpa.desc".parse().unwrap();
        assert_eq!(spec.field, "gpa");
        assert_eq!(spec.direction, SortDirection::Desc);

        let spec: SortSpec = "-start_date".parse().unwrap();
        assert_eq!(spec.field, "start_date");
        assert_eq!(spec.direction, SortDirection::Desc);

        let spec: SortSpec = "created_at.ASC".parse().unwrap();
        assert_eq!(spec.direction, SortDirection::Asc);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("name.sideways".parse::<SortSpec>().is_err());
        assert!("".parse::<SortSpec>().is_err());
        assert!("name;drop".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_parse_allowed() {
        let allowed = ["name", "created_at"];
        assert_eq!(SortSpec::parse_allowed(None, &allowed), Ok(None));
        assert_eq!(SortSpec::parse_allowed(Some("  "), &allowed), Ok(None));
        assert!(SortSpec::parse_allowed(Some("-name"), &allowed).unwrap().is_some());
        assert!(SortSpec::parse_allowed(Some("password"), &allowed).is_err());
    }
}
