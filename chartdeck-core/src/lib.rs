//! chartdeck library exports

pub mod catalog;
pub mod config;
pub mod site;
