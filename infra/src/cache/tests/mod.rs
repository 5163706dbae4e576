mod memory_rate_limiter_tests;
