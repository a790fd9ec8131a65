#![allow(dead_code)]

pub mod app;
pub mod temp_db;
