//! Domain services module

pub mod reorder;
pub mod validation;
pub mod response_query;
pub mod analytics;
pub mod notifications;
pub mod templates;

pub use reorder::{move_item, DragSession};
pub use validation::{is_valid_email, is_valid_phone, is_valid_url, SubmissionValidator, ValidationErrors};
pub use response_query::{
    page_count, paginate, Page, ResponseQuery, SortDirection, SortKey, StatusFilter, DEFAULT_PAGE_SIZE,
};
pub use analytics::{
    AnalyticsService, Dashboard, DeviceBreakdown, DailyCount, FieldCompletion, FormAnalytics, RecentResponse,
    MAX_WINDOW_DAYS,
};
pub use notifications::{NotificationEvent, NotificationTemplate};
pub use templates::FormTemplate;
