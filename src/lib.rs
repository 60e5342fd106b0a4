//! Video wall service: upload, list and delete video files over a small
//! HTTP API. Uploaded bytes land in an upload directory; metadata lives in
//! one flat JSON-array file.

pub mod config;
pub mod error;
pub mod sys_core;
pub mod sys_statichost;
pub mod sys_videoapi;
