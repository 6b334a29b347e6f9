use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        alias = "perPage",
        alias = "per_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

impl PaginationQuery {
    pub const MAX_SIZE: i64 = 100;
    /// 保证 page * size 不溢出
    pub const MAX_PAGE: i64 = i64::MAX / Self::MAX_SIZE;

    /// 规范化后的 (page, size)，page 从 1 开始
    pub fn normalized(&self) -> (u64, u64) {
        (
            self.page.clamp(1, Self::MAX_PAGE) as u64,
            self.size.clamp(1, Self::MAX_SIZE) as u64,
        )
    }
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = total.div_ceil(page_size.max(1));
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapped {
        #[serde(flatten)]
        pagination: PaginationQuery,
    }

    #[test]
    fn test_per_page_alias() {
        let q: PaginationQuery = serde_json::from_str(r#"{"page":"2","perPage":"25"}"#).unwrap();
        assert_eq!(q.normalized(), (2, 25));

        let q: PaginationQuery = serde_json::from_str(r#"{"per_page":7}"#).unwrap();
        assert_eq!(q.normalized(), (1, 7));
    }

    #[test]
    fn test_flattened_query_string() {
        let w = actix_web::web::Query::<Wrapped>::from_query("page=3&size=500").unwrap();
        assert_eq!(w.pagination.normalized(), (3, 100));
    }

    #[test]
    fn test_normalized_bounds() {
        let q = PaginationQuery { page: -4, size: 0 };
        assert_eq!(q.normalized(), (1, 1));
    }

    #[test]
    fn test_huge_page_is_capped() {
        let w = actix_web::web::Query::<Wrapped>::from_query(
            "page=9223372036854775807&perPage=100",
        )
        .unwrap();
        let (page, size) = w.pagination.normalized();
        assert_eq!(page, PaginationQuery::MAX_PAGE as u64);
        assert!(page.checked_mul(size).is_some());
    }

    #[test]
    fn test_pagination_info_pages() {
        let info = PaginationInfo::new(1, 10, 21);
        assert_eq!(info.total_pages, 3);
        assert_eq!(PaginationInfo::new(1, 10, 0).total_pages, 0);
    }
}
