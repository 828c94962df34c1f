pub mod home;
pub mod org_chart;
pub mod task_list;
pub mod user_details;
pub mod utils;
