pub mod header;
pub mod upload_area;
pub mod extract_button;
pub mod results_panel;
