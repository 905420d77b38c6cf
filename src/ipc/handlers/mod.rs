pub mod backup;
pub mod browser;
pub mod catalog;
pub mod core;
pub mod form;
pub mod sheet;
