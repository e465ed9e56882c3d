mod incomplete_tests;
mod prefixes_tests;
mod unclosed_tests;
mod unexpected_tests;
