mod support;

mod enhance_all_tests;
