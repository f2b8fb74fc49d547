pub mod catalog;
pub mod initialize;
pub mod pack;
pub mod recommend;
