//! 基于版本号的标签缓存
//!
//! 每个标签在缓存中保存一个版本号，数据键带上当前版本。
//! 失效标签时只需写入新版本，旧键随 TTL 自然过期。

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::{CacheResult, ObjectCache};

/// 公开成绩查询使用的标签
pub const RESULTS_TAG: &str = "results";

fn version_key(tag: &str) -> String {
    format!("tag:{tag}:version")
}

fn tagged_key(tag: &str, version: &str, key: &str) -> String {
    format!("{tag}:v{version}:{key}")
}

fn new_version() -> String {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| chrono::Utc::now().timestamp_micros())
        .to_string()
}

/// 读取标签版本，不存在时生成并写入
async fn current_version(cache: &dyn ObjectCache, tag: &str) -> String {
    match cache.get_raw(&version_key(tag)).await {
        CacheResult::Found(version) => version,
        _ => {
            let version = new_version();
            cache
                .insert_raw(version_key(tag), version.clone(), 0)
                .await;
            version
        }
    }
}

pub async fn get_tagged<T: DeserializeOwned>(
    cache: &dyn ObjectCache,
    tag: &str,
    key: &str,
) -> Option<T> {
    let version = current_version(cache, tag).await;
    let full_key = tagged_key(tag, &version, key);

    match cache.get_raw(&full_key).await {
        CacheResult::Found(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Dropping undecodable cache entry {}: {}", full_key, e);
                cache.remove(&full_key).await;
                None
            }
        },
        _ => None,
    }
}

pub async fn insert_tagged<T: Serialize>(
    cache: &dyn ObjectCache,
    tag: &str,
    key: &str,
    value: &T,
    ttl: u64,
) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    let version = current_version(cache, tag).await;
    cache
        .insert_raw(tagged_key(tag, &version, key), raw, ttl)
        .await;
}

/// 使标签下的全部键失效
pub async fn invalidate_tag(cache: &dyn ObjectCache, tag: &str) {
    cache.insert_raw(version_key(tag), new_version(), 0).await;
    debug!("Cache tag '{}' invalidated", tag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use std::time::Duration;

    fn cache() -> MokaCacheWrapper {
        MokaCacheWrapper::with_capacity(100, Duration::from_secs(60))
    }

    #[test]
    fn test_tagged_key_format() {
        assert_eq!(tagged_key("results", "42", "S001"), "results:v42:S001");
        assert_eq!(version_key("results"), "tag:results:version");
    }

    #[tokio::test]
    async fn test_roundtrip_under_tag() {
        let cache = cache();
        insert_tagged(&cache, RESULTS_TAG, "S001", &vec![1, 2, 3], 0).await;

        let hit: Option<Vec<i32>> = get_tagged(&cache, RESULTS_TAG, "S001").await;
        assert_eq!(hit, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_invalidate_hides_old_entries() {
        let cache = cache();
        insert_tagged(&cache, RESULTS_TAG, "S001", &"old", 0).await;

        // 版本号精度为纳秒，稍等以保证新旧版本不同
        tokio::time::sleep(Duration::from_millis(2)).await;
        invalidate_tag(&cache, RESULTS_TAG).await;

        let miss: Option<String> = get_tagged(&cache, RESULTS_TAG, "S001").await;
        assert_eq!(miss, None);
    }

    #[tokio::test]
    async fn test_other_tags_unaffected() {
        let cache = cache();
        insert_tagged(&cache, "users", "1", &"kept", 0).await;

        tokio::time::sleep(Duration::from_millis(2)).await;
        invalidate_tag(&cache, RESULTS_TAG).await;

        let hit: Option<String> = get_tagged(&cache, "users", "1").await;
        assert_eq!(hit.as_deref(), Some("kept"));
    }
}
