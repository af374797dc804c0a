// src/lib.rs

pub mod cache;
pub mod config;
pub mod http;
pub mod platforms;
pub mod services;
pub mod tasks;

pub use streamwatch_common::error::Error;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse};
