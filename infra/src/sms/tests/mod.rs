//! Tests for the SMS channels and failover dispatcher

pub mod dispatcher_factory_tests;
