pub mod history_table;
pub mod menu;
pub mod progress_bar;
pub mod quiz_area;
pub mod quiz_status;
pub mod result_panel;
pub mod study_card;
