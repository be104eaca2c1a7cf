pub mod api;
pub mod catalog_view;
pub mod cli;
pub mod cli_style;
pub mod config;
pub mod forms;
pub mod nav_state;
pub mod pages;
pub mod search;
