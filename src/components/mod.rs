pub mod filter_panel;
pub mod force_graph;
pub mod info_panel;
pub mod job_skills;
pub mod search_bar;
