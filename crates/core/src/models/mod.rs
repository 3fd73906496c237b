pub mod bar;
pub mod chart;
pub mod history;
pub mod market;
pub mod prediction;
pub mod settings;
