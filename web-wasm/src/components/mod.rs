pub mod compare_slider;
pub mod filter_controls;
pub mod footer;
pub mod generate_panel;
pub mod header;
pub mod prompt_panel;
pub mod settings_panel;
pub mod step_tabs;
pub mod upload_area;
