pub mod analyzer;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod figure;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod output;
pub mod palette;
pub mod roster;
pub mod scorecard;
pub mod session;
pub mod table;
pub mod view;
