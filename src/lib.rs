//! Terminal file explorer: directory listings with permission bits,
//! navigation, file operations and recursive name search.

pub mod core;
pub mod models;
pub mod pages;
pub mod services;
pub mod ui;
