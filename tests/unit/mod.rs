//! Unit test modules.

mod animator_test;
mod config_test;
mod geo_test;
mod import_test;
