pub mod object_cache;
pub mod register;
pub mod tags;
pub mod traits;

pub use tags::{RESULTS_TAG, get_tagged, insert_tagged, invalidate_tag};
pub use traits::{CacheResult, ObjectCache};

/// 声明缓存插件，生成 `register()` 将构造器写入插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub fn register() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::GradeSysError::cache_connection)?;
                        let boxed: Box<dyn $crate::cache::ObjectCache> = Box::new(cache);
                        $crate::errors::Result::Ok(boxed)
                    })
                }),
            );
        }
    };
}

/// 注册内置缓存后端
pub fn register_builtin_plugins() {
    object_cache::moka::register();
    object_cache::redis::register();
}
