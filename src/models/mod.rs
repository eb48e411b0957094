// Data models for pose input, capture devices, and exercise counting

pub mod capture;
pub mod exercise;
pub mod pose;
