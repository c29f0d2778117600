//! Integration tests for `maro_db_core`, driven through its public API.
