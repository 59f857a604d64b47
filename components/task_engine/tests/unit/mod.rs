//! Integration test runner for unit tests

mod scheduler_test;
