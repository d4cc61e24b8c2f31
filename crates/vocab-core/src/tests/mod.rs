mod auth_tests;
