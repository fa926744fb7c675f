/// Unit tests over the public domain API
mod streak_tests;
mod policy_tests;
