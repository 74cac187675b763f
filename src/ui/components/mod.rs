pub mod analytics;
pub mod chat_panel;
pub mod course_detail;
pub mod dashboard;
pub mod faculty;
pub mod login;
pub mod progress_bar;
pub mod quiz;
pub mod result_card;
pub mod unit_detail;
