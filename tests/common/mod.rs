#![allow(dead_code)]

pub mod command;
pub mod file;
pub mod svn;

pub const GIT_AUTHOR: &str = "Test Author";
pub const GIT_EMAIL: &str = "author@example.com";
pub const GIT_DATE: &str = "2023-01-01 12:00:00 +0000";
