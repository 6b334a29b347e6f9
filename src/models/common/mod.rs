pub mod delete;
pub mod pagination;
pub mod response;
pub mod sort;

pub use delete::DeleteOutcome;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use sort::{SortDirection, SortSpec};
