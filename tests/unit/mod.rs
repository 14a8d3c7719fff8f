/// Unit tests against the public library API
mod store_tests;
mod tools_tests;
