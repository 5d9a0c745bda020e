//! Wire Contract Tests

mod envelope_tests;
