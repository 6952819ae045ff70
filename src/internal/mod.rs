pub mod comment;
pub mod debounce;
pub mod filters;
pub mod infinite_scroll;
pub mod models;
pub mod notification;
pub mod pages;
pub mod remote_list;
pub mod search;
pub mod tabs;
pub mod theme;
pub mod ui;
