pub mod classifier;
pub mod excel;
pub mod file_processor;
pub mod mapper;
pub mod writer;
