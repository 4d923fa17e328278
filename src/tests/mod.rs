//! Scenario and property tests exercising the library end to end.

mod scoring_tests;
