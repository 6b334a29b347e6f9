/// 删除操作的结果
///
/// 存在依赖行时返回 `HasDependents`，携带阻止删除的依赖名称。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    HasDependents(&'static str),
}
