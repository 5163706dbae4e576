mod verification_entry_tests;
