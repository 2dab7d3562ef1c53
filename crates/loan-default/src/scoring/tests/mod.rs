mod common;
mod encoding;
mod models;
