pub mod datetime;
pub mod html;
pub mod theme_loader;
pub mod url;
