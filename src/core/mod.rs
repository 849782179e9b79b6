pub mod app;
pub mod cases;
pub mod config;
pub mod matching;
pub mod normalize;
pub mod paths;
pub mod sequence;
pub mod similarity;
