//! Library integration tests for modbox-lib.

mod host_tests;
